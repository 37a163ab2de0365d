//! Criterion benchmarks for the record emitter hot path.
//!
//! Scans synthetic sounding-like subsets where every level repeats a
//! pressure qualifier followed by three data elements.

use bufr2geojson::Config;
use bufr2geojson::app::models::{Element, RawValue};
use bufr2geojson::app::services::record_emitter::RecordEmitter;
use bufr2geojson::app::services::table_resolver::CodeFlagTables;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn element(key: &str, code: &str, value: f64, units: &str, scale: i32) -> Element {
    Element::new(key, code.parse().unwrap(), Some(RawValue::Float(value)), units, scale)
}

fn sounding(levels: usize) -> Vec<Element> {
    let mut elements = vec![
        element("#1#blockNumber", "001001", 3.0, "Numeric", 0),
        element("#1#stationNumber", "001002", 953.0, "Numeric", 0),
        element("#1#year", "004001", 2022.0, "a", 0),
        element("#1#month", "004002", 3.0, "mon", 0),
        element("#1#day", "004003", 20.0, "d", 0),
        element("#1#hour", "004004", 12.0, "h", 0),
        element("#1#latitude", "005001", 51.93, "deg", 2),
        element("#1#longitude", "006001", -10.25, "deg", 2),
    ];
    for level in 0..levels {
        let n = level + 1;
        elements.push(element(
            &format!("#{}#pressure", n),
            "007004",
            100_000.0 - level as f64 * 500.0,
            "Pa",
            -1,
        ));
        elements.push(element(
            &format!("#{}#airTemperature", n),
            "012101",
            288.0 - level as f64 * 0.3,
            "K",
            2,
        ));
        elements.push(element(
            &format!("#{}#dewpointTemperature", n),
            "012103",
            280.0 - level as f64 * 0.4,
            "K",
            2,
        ));
        elements.push(element(&format!("#{}#windSpeed", n), "011002", 7.5, "m/s", 1));
    }
    elements
}

fn bench_stream(c: &mut Criterion) {
    let config = Config::default().with_guess_wsi();
    let tables = CodeFlagTables::in_memory();

    let mut group = c.benchmark_group("record_emitter/stream");
    for levels in [10usize, 100, 1000] {
        let elements = sounding(levels);
        group.throughput(Throughput::Elements(elements.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(levels), &elements, |b, elements| {
            b.iter(|| {
                let emitted = RecordEmitter::new(&config, &tables, 37)
                    .stream(black_box(elements))
                    .filter(Result::is_ok)
                    .count();
                black_box(emitted);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stream);
criterion_main!(benches);
