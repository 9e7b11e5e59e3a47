use polyalg::{
    poly::{division::DivisionOutcome, parse::parse_polynomials, univariate::UnivariatePolynomial},
    settings::Settings,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn univariate() {
    let a = UnivariatePolynomial::parse("6x^9+24x^8+15x^7+6x^2+24x+15", "x").unwrap();
    let b = UnivariatePolynomial::parse("2x^3+8x^2+5x+1", "x").unwrap();

    let (q, r) = a.divide(&b).unwrap();
    println!("> {} / {} =", a, b);
    println!("\tquotient {}\n\tremainder {}", q, r);
    println!("> gcd({}, {}) = {}", a, b, a.gcd(&b));
}

fn multivariate() {
    let ps = parse_polynomials(&["x^2*y^3+b*y^2+3*a*x^2*y+3*a*b", "y^2+3*a", "x*y-1"]).unwrap();

    for d in &ps[1..] {
        println!("> {} / {} =", ps[0], d);
        match ps[0].heuristic_divide(d, &Settings::default()).unwrap() {
            DivisionOutcome::Divided {
                quotient,
                remainder,
            } => println!("\tquotient {}\n\tremainder {}", quotient, remainder),
            DivisionOutcome::DegenerateStop { .. } => println!("\tno progress"),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("POLYALG_LOG"))
        .init();

    univariate();
    multivariate();
}
