//! Benchmark for value-only mapping over a synthetic plant submodel.
//!
//! Builds a submodel with one collection per machine (default 5000, or the
//! first argument) and times reading, encoding, decoding and writing its
//! value.

use std::time::Instant;

use aas_value::model::builder::{ElementsBuilder, SubmodelBuilder};
use aas_value::model::{DataTypeDefXsd, ElementKind, EntityType, Reference, Submodel};
use aas_value::{
    decode_submodel, encode_submodel, validate_submodel, write_value_only, ValueMapper,
    ValueOnlyOptions,
};
use uuid::Uuid;

const HISTORY_LEN: usize = 16;

fn machine(e: ElementsBuilder, index: usize) -> ElementsBuilder {
    let asset = format!("urn:uuid:{}", Uuid::new_v4());
    e.collection(format!("Machine{}", index), |m| {
        m.property("Name", DataTypeDefXsd::String, format!("machine-{}", index))
            .property("Running", DataTypeDefXsd::Boolean, if index % 3 == 0 { "false" } else { "true" })
            .property("Speed", DataTypeDefXsd::Double, format!("{}.25", index % 1500))
            .multi_language("Label", &[("en", "Press"), ("de", "Presse")])
            .range("Temperature", DataTypeDefXsd::Int, "-20", "80")
            .list("History", ElementKind::Property, |l| {
                (0..HISTORY_LEN).fold(l.value_type(DataTypeDefXsd::Double), |l, i| {
                    l.property(DataTypeDefXsd::Double, format!("{}.5", i))
                })
            })
            .entity("Motor", EntityType::SelfManagedEntity, |en| {
                en.global_asset_id(asset)
                    .specific_asset_id("serialNumber", format!("SN-{}", index))
                    .statements(|s| s.property("Power", DataTypeDefXsd::Int, "7500"))
            })
            .reference("Manual", Reference::global(format!("urn:uuid:{}", Uuid::now_v7())))
    })
}

fn build_submodel(machines: usize) -> Submodel {
    SubmodelBuilder::new(format!("urn:uuid:{}", Uuid::now_v7()))
        .id_short("Plant")
        .elements(|e| (0..machines).fold(e, machine))
        .build()
}

fn main() {
    let machines: usize = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5000);

    let build_start = Instant::now();
    let mut submodel = build_submodel(machines);
    println!("Built {} machines in {:?}", machines, build_start.elapsed());

    let validate_start = Instant::now();
    validate_submodel(&submodel).expect("synthetic submodel is valid");
    println!("Validated in {:?}", validate_start.elapsed());

    let read_start = Instant::now();
    let value = submodel.value();
    println!("Read value tree ({} entries) in {:?}", value.len(), read_start.elapsed());

    for (label, options) in [("string", ValueOnlyOptions::new()), ("typed", ValueOnlyOptions::typed())] {
        let encode_start = Instant::now();
        let json = encode_submodel(&submodel, &options);
        let encode_time = encode_start.elapsed();
        let text = serde_json::to_string(&json).expect("failed to serialize");
        println!(
            "Encoded {} scalars in {:?} ({} bytes)",
            label,
            encode_time,
            text.len()
        );
    }

    let json = encode_submodel(&submodel, &ValueOnlyOptions::new());

    let decode_start = Instant::now();
    let decoded = decode_submodel(&submodel, &json).expect("failed to decode");
    println!("Decoded in {:?}", decode_start.elapsed());
    assert_eq!(decoded, value, "decoded value differs from the tree");

    let write_start = Instant::now();
    write_value_only(&mut submodel, None, &json).expect("failed to write");
    println!("Wrote full value in {:?}", write_start.elapsed());

    let partial = serde_json::json!({ "Machine0": { "Speed": "999.0", "Running": "false" } });
    let partial_start = Instant::now();
    for _ in 0..1000 {
        write_value_only(&mut submodel, None, &partial).expect("failed to write");
    }
    println!("1000 partial writes in {:?}", partial_start.elapsed());
}
