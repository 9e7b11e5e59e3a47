use polyalg::{
    domains::rational::Rational,
    poly::{
        factor::{FactorOutcome, Factorize},
        parse::parse_polynomial,
        univariate::UnivariatePolynomial,
    },
    settings::Settings,
};

fn factor(input: &str) -> String {
    parse_polynomial(input, None)
        .unwrap()
        .factor(&Settings::default())
        .to_string()
}

#[test]
fn univariate() {
    assert_eq!(factor("x^2-1"), "(x+1)*(x-1)");
    assert_eq!(factor("4x^2-1"), "(2*x+1)*(2*x-1)");
    assert_eq!(factor("x^5-x"), "x*(x+1)*(x-1)*(x^2+1)");
    assert_eq!(factor("(x^2+x+1)*(x^2+2x+3)"), "(x^2+2*x+3)*(x^2+x+1)");
}

#[test]
fn repeated_factors() {
    assert_eq!(factor("(x-2)^3*(x+5)^2"), "(x+5)^2*(x-2)^3");

    let p = parse_polynomial("(2x+1)^4*(x-1)/3", None).unwrap();
    let set = p.factor(&Settings::default());
    assert_eq!(set.constant(), &Rational::new(1, 3));
    let (_, factors) = set.clone().into_factors();
    let powers: Vec<i64> = factors.iter().map(|f| f.power).collect();
    assert_eq!(powers, vec![4, 1]);
    assert_eq!(set.expand().unwrap(), p);
}

#[test]
fn from_univariate() {
    let p = UnivariatePolynomial::parse("x^3-6x^2+11x-6", "x").unwrap();
    match p.try_factor(&Settings::default()) {
        FactorOutcome::Factored(set) => {
            assert_eq!(set.len(), 3);
            assert_eq!(set.to_string(), "(x-1)*(x-2)*(x-3)");
        }
        o => panic!("Expected factors, got {:?}", o),
    }
}

#[test]
fn multivariate() {
    assert_eq!(factor("x^2-y^2"), "(x+y)*(x-y)");
    assert_eq!(factor("x^2*y^3+b*y^2+3*a*x^2*y+3*a*b"), "(x^2*y+b)*(y^2+3*a)");
    assert_eq!(factor("x^3+8*y^3"), "(x+2*y)*(x^2-2*x*y+4*y^2)");
}

#[test]
fn trivial() {
    let settings = Settings::default();
    let p = parse_polynomial("x+y+1", None).unwrap();
    assert!(matches!(p.try_factor(&settings), FactorOutcome::Unchanged));
    assert_eq!(p.factor(&settings).to_string(), "(x+y+1)");

    let zero = p.zero();
    assert!(zero.factor(&settings).is_zero());

    let c = p.constant(Rational::new(-3, 4));
    assert_eq!(c.factor(&settings).to_string(), "-3/4");
}

#[test]
fn depth_limit() {
    let p = parse_polynomial("x^4-y^4", None).unwrap();
    let settings = Settings::default().with_max_factor_depth(0);
    let set = p.factor(&settings);
    assert_eq!(set.len(), 1);
    assert_eq!(set.expand().unwrap(), p);

    let set = p.factor(&Settings::default());
    assert_eq!(set.to_string(), "(x+y)*(x-y)*(x^2+y^2)");
}
