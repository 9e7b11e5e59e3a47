use polyalg::{root_finding::RootFinder, settings::Settings};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("POLYALG_LOG"))
        .init();

    let finder = RootFinder::new(&Settings::default().with_decimal_precision(10));

    for coefficients in [
        vec![1., 0., 1.],
        vec![1., -6., 11., -6.],
        vec![1., 0., -4., -14., -13., 30.],
        vec![1., 0., 0., 0., 0., 0., 0., -1.],
    ] {
        println!("> Roots of {:?}:", coefficients);
        match finder.solve(&coefficients) {
            Ok(r) => {
                for root in &r.roots {
                    println!("\t{}", root);
                }
                if !r.is_complete() {
                    println!("\t{} roots not found", r.unresolved);
                }
            }
            Err(e) => println!("\terror: {}", e),
        }
    }
}
