use polyalg::{
    poly::{division::DivisionOutcome, parse::parse_polynomials},
    settings::Settings,
};

#[test]
fn univariate_through_heuristic() {
    let ps = parse_polynomials(&["x^2+2x+1", "x+1"]).unwrap();
    let (q, r) = ps[0].quot_rem(&ps[1], &Settings::default()).unwrap();
    assert_eq!(q, ps[1]);
    assert!(r.is_zero());
}

#[test]
fn grouped_divisor() {
    let ps = parse_polynomials(&["x^2*y^3+b*y^2+3*a*x^2*y+3*a*b", "y^2+3*a", "x^2*y+b"]).unwrap();
    match ps[0].heuristic_divide(&ps[1], &Settings::default()).unwrap() {
        DivisionOutcome::Divided {
            quotient,
            remainder,
        } => {
            assert_eq!(quotient, ps[2]);
            assert!(remainder.is_zero());
        }
        o => panic!("Expected a quotient, got {:?}", o),
    }

    assert_eq!(ps[0].divides(&ps[2], &Settings::default()), Some(ps[1].clone()));
}

#[test]
fn reconstruction() {
    let settings = Settings::default();
    let ps = parse_polynomials(&["x^3*y+2*x*y^2-y+7", "x*y-1", "x^2+y^2+1"]).unwrap();
    for d in &ps[1..] {
        if let DivisionOutcome::Divided {
            quotient,
            remainder,
        } = ps[0].heuristic_divide(d, &settings).unwrap()
        {
            assert_eq!(&(&quotient * d) + &remainder, ps[0]);
        }
    }
}

#[test]
fn not_divisible() {
    let ps = parse_polynomials(&["x^2+y^2", "x+y"]).unwrap();
    assert_eq!(ps[0].divides(&ps[1], &Settings::default()), None);
}

#[test]
fn monomial_divisor() {
    let settings = Settings::default();
    let ps = parse_polynomials(&["x*y^2+y^3", "y^3", "x*y^2"]).unwrap();
    let (q, r) = ps[0].quot_rem(&ps[1], &settings).unwrap();
    assert!(q.is_one());
    assert_eq!(r, ps[2]);

    let ps = parse_polynomials(&[
        "x^3*y^2+3*y^3*z-2*x^2*z+z^2",
        "3*y^3",
        "z",
        "x^3*y^2-2*x^2*z+z^2",
    ])
    .unwrap();
    let (q, r) = ps[0].quot_rem(&ps[1], &settings).unwrap();
    assert_eq!(q, ps[2]);
    assert_eq!(r, ps[3]);
}
