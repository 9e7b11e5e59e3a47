use polyalg::{
    poly::{factor::Factorize, parse::parse_polynomial},
    settings::Settings,
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn factor_univariate(settings: &Settings) {
    for input in ["3*(2x+1)^2*(x-4)*(x^2+1)", "x^8-1", "x^4+3x^3+6x^2+5x+3"] {
        let poly = parse_polynomial(input, None).unwrap();
        println!("> Factorization of {}:", poly);
        println!("\t{}", poly.factor(settings));
    }
}

fn factor_multivariate(settings: &Settings) {
    for input in ["x^2*y^3+b*y^2+3*a*x^2*y+3*a*b", "x^6-y^6", "2*x^3*y-16*y^4"] {
        let poly = parse_polynomial(input, None).unwrap();
        println!("> Factorization of {}:", poly);
        println!("\t{}", poly.factor(settings));
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("POLYALG_LOG"))
        .init();

    let settings = Settings::default();
    factor_univariate(&settings);
    factor_multivariate(&settings);
}
