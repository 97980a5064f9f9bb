//! K-nearest neighbours, k-means and classification on the demo dataset.

use plano::render::{render, Viewport};
use plano::Dataset;

fn main() {
    let mut ds = Dataset::new();
    ds.load_demo();

    // --- 3-NN of the first point ---
    let first = ds.points()[0].name.clone();
    println!("=== 3-NN of {first} ===");
    for r in ds.nearest(&first, 3).unwrap() {
        println!("  {:4} d = {:.4}", r.point_name, r.distance);
    }

    // --- K-means (k=3) ---
    ds.run_clustering(3).unwrap();
    println!("\n=== K-means (k=3) ===");
    for s in ds.group_summaries() {
        println!(
            "  {} [{}] {:2} points, centroid {:.2}",
            s.group.name, s.group.symbol, s.members, s.group.centroid
        );
    }

    // --- Classify a new point against the existing groups ---
    let g = ds.classify_and_insert("NEW", 0.5, -2.0).unwrap();
    println!("\n  NEW (0.5, -2.0) => {}", ds.groups()[g].name);

    let viewport = Viewport::default();
    let canvas = render(ds.points(), ds.groups(), &viewport);
    print!("{}", canvas.framed("K-MEANS k=3", ds.groups()));
}
