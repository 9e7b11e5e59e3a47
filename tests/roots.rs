use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use polyalg::{
    domains::float::Complex,
    root_finding::{find_roots, RootFinder},
    settings::Settings,
};

fn sorted(mut roots: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    roots
}

/// The coefficients of `prod (x - r)`, highest degree first.
fn from_roots(roots: &[i64]) -> Vec<f64> {
    let mut c = vec![1.];
    for r in roots {
        let mut next = vec![0.; c.len() + 1];
        for (i, a) in c.iter().enumerate() {
            next[i] += a;
            next[i + 1] -= a * *r as f64;
        }
        c = next;
    }
    c
}

#[test]
fn imaginary_unit() {
    let roots = sorted(find_roots(&[1., 0., 1.], 7).unwrap());
    assert_eq!(roots, vec![Complex::new(0., -1.), Complex::new(0., 1.)]);
}

#[test]
fn integer_roots() {
    let roots = sorted(find_roots(&[1., -6., 11., -6.], 7).unwrap());
    assert_eq!(
        roots,
        vec![
            Complex::new(1., 0.),
            Complex::new(2., 0.),
            Complex::new(3., 0.)
        ]
    );
}

#[test]
fn random_integer_roots() {
    let mut rng = StdRng::seed_from_u64(20);
    let finder = RootFinder::new(&Settings::default());

    for _ in 0..50 {
        let mut pool: Vec<i64> = (-6..=6).collect();
        pool.shuffle(&mut rng);
        let n = rng.gen_range(1..=5);
        let mut expected = pool[..n].to_vec();
        expected.sort();

        let coefficients = from_roots(&expected);
        let result = finder.solve(&coefficients).unwrap();
        assert!(result.is_complete(), "stalled on {:?}", expected);

        let roots = sorted(result.roots);
        assert_eq!(roots.len(), n);
        for (r, e) in roots.iter().zip(&expected) {
            assert!(
                (r.re - *e as f64).abs() < 1e-4 && r.im.abs() < 1e-4,
                "root {} of {:?} is off: {}",
                e,
                expected,
                r
            );
        }
    }
}

#[test]
fn scaled_input() {
    let roots = sorted(find_roots(&[1e-3, -6e-3, 11e-3, -6e-3], 7).unwrap());
    let re: Vec<f64> = roots.iter().map(|r| r.re).collect();
    assert_eq!(re, vec![1., 2., 3.]);
}

#[test]
fn errors() {
    let finder = RootFinder::new(&Settings::default());
    assert!(finder.solve(&[]).is_err());
    assert!(finder.solve(&[0., 0.]).is_err());
    assert!(finder.solve(&[1., f64::INFINITY]).is_err());
    assert!(finder.solve(&[2.]).unwrap().roots.is_empty());
}
