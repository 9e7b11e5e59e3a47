use polyalg::{
    domains::rational::Rational,
    poly::{parse::parse_polynomial, univariate::UnivariatePolynomial, PolynomialError},
};

fn upoly(input: &str) -> UnivariatePolynomial<polyalg::domains::rational::RationalField> {
    UnivariatePolynomial::parse(input, "x").unwrap()
}

#[test]
fn divide_exact() {
    let (q, r) = upoly("x^2+2x+1").divide(&upoly("x+1")).unwrap();
    assert_eq!(q, upoly("x+1"));
    assert!(r.is_zero());
}

#[test]
fn divide_with_remainder() {
    let a = upoly("x^3-2x+5");
    let b = upoly("2x^2+1");
    let (q, r) = a.divide(&b).unwrap();
    assert_eq!(q, upoly("x/2"));
    assert_eq!(r, upoly("-5x/2+5"));
    assert_eq!(&(&q * &b) + &r, a);

    assert_eq!(
        a.divide(&a.zero()),
        Err(PolynomialError::DivisionDegenerate)
    );
}

#[test]
fn gcd() {
    assert_eq!(upoly("x^2+2x+1").gcd(&upoly("x+1")), upoly("x+1"));

    let a = upoly("6x^9+24x^8+15x^7+6x^2+24x+15");
    let b = upoly("2x^2+8x+5");
    assert_eq!(a.gcd(&b), b);

    assert!(upoly("x^2+1").gcd(&upoly("x-1")).is_one());
}

#[test]
fn square_free() {
    let p = upoly("(x-1)*(x+2)^2*(x-3)^3");
    let factors = p.square_free_factorization();
    assert_eq!(
        factors,
        vec![(upoly("x-1"), 1), (upoly("x+2"), 2), (upoly("x-3"), 3)]
    );

    let (part, cofactor, k) = p.square_free();
    assert_eq!(part, upoly("x-3"));
    assert_eq!(k, 3);
    assert_eq!(&part.pow(3) * &cofactor, p);
}

#[test]
fn evaluate() {
    let p = upoly("x^3/3-x+1");
    assert_eq!(p.evaluate(&Rational::new(3, 1)), Rational::new(7, 1));
    assert_eq!(p.evaluate(&Rational::new(1, 2)), Rational::new(13, 24));
}

#[test]
fn multivariate_arithmetic() {
    let p = parse_polynomial("(x+y)^2-(x-y)^2", None).unwrap();
    let q = parse_polynomial("4*x*y", Some(p.variables.clone())).unwrap();
    assert_eq!(p, q);
    assert_eq!(p.to_string(), "4*x*y");
    assert_eq!(p.total_degree(), 2);
}

#[test]
fn gcd_properties() {
    let a = upoly("(x-1)^2*(x+3)*(2x+1)");
    let b = upoly("(x-1)*(2x+1)^2*(x^2+5)");
    let g = a.gcd(&b);
    assert_eq!(g, b.gcd(&a));
    assert_eq!(g, upoly("2x^2-x-1"));
    assert!(a.divides(&g).is_some());
    assert!(b.divides(&g).is_some());
    assert_eq!(a.zero().gcd(&b), b.content_and_primitive().1);
}

#[test]
fn square_free_parts() {
    let p = upoly("(x^2+1)^2*(x-4)^2*(3x+2)");
    for (part, _) in p.square_free_factorization() {
        assert!(part.gcd(&part.derivative()).is_constant());
    }
}
