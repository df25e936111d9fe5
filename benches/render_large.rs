use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use docgen::{Converter, Node};

/// Builds a synthetic document: `domains` entities plus a section of
/// reference lists pointing back at them.
fn build_document(domains: usize) -> Node {
    let mut yaml = String::from("domains:\n");
    for i in 0..domains {
        yaml.push_str(&format!(
            "  - id: dom_entity{i}\n    name: Entity {i}\n    status: live\n"
        ));
    }
    yaml.push_str("links:\n  members:\n");
    for i in 0..domains {
        yaml.push_str(&format!("    - dom_entity{i}\n"));
    }
    serde_yaml::from_str::<serde_yaml::Value>(&yaml)
        .unwrap()
        .into()
}

fn bench_convert(c: &mut Criterion) {
    let root = build_document(500);
    let converter = Converter::default();

    c.bench_function("convert_500_entities", |b| {
        b.iter(|| {
            let markdown = converter.convert(black_box(&root), "bench.yaml").unwrap();
            black_box(markdown);
        });
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
