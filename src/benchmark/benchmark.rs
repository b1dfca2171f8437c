use std::time::Instant;

use crate::configuration::config::SimConfig;
use crate::storage::star::{NVec2, Star2D};
use crate::storage::store::GalaxyStore;

/// Deterministic star field inside the default 1000-wide root box,
/// no rand needed.
fn make_star(i: usize) -> Star2D {
    let i_f = i as f64;
    Star2D {
        x: NVec2::new((i_f * 0.37).sin() * 400.0, (i_f * 0.13).cos() * 400.0),
        v: NVec2::zeros(),
        m: 1000.0,
    }
}

fn build_store(n: usize) -> GalaxyStore {
    let cfg = SimConfig::default();
    let mut store = GalaxyStore::connect(&cfg).expect("connect");
    for i in 0..n {
        store.insert_star(1, make_star(i)).expect("insert");
    }
    store
}

/// Time insertion, the two aggregation passes, and a full force sweep for
/// a range of system sizes.
pub fn bench_insert() {
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let cfg = SimConfig::default();
        let mut store = GalaxyStore::connect(&cfg).expect("connect");

        let t0 = Instant::now();
        for i in 0..n {
            store.insert_star(1, make_star(i)).expect("insert");
        }
        let dt_insert = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        store.update_total_mass(1).expect("total mass");
        store.update_center_of_mass(1).expect("center of mass");
        let dt_aggregate = t1.elapsed().as_secs_f64();

        let ids = store.list_star_ids_for_tree(1);
        let t2 = Instant::now();
        for id in &ids {
            let star = store.get_star(*id).expect("get star");
            let force = store.calc_force(1, &star, 0.5).expect("force");
            store.update_star_force(*id, force).expect("writeback");
        }
        let dt_force = t2.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, insert = {dt_insert:8.6} s, aggregate = {dt_aggregate:8.6} s, forces = {dt_force:8.6} s"
        );
    }
}

/// Force-sweep timing across theta values as CSV rows.
/// Paste output directly into excel to graph.
pub fn bench_force_curve() {
    println!("N,theta,force_ms");

    for n in (200..=3200).step_by(200) {
        let mut store = build_store(n);
        store.update_total_mass(1).expect("total mass");
        store.update_center_of_mass(1).expect("center of mass");

        let ids = store.list_star_ids_for_tree(1);
        for theta in [0.3, 0.5, 0.7, 1.0] {
            let t0 = Instant::now();
            for id in &ids {
                let star = store.get_star(*id).expect("get star");
                let _ = store.calc_force(1, &star, theta).expect("force");
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0;
            println!("{n},{theta},{ms:.6}");
        }
    }
}
