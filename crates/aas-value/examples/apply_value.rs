//! Applies a value-only JSON file to a demo submodel and prints the result.
//!
//! Usage: `apply_value [file.json] [idShort.path]`

use std::fs;

use aas_value::model::builder::SubmodelBuilder;
use aas_value::model::{DataTypeDefXsd, ElementKind, Submodel};
use aas_value::{read_value_only, validate_submodel, write_value_only, IdShortPath, ValueOnlyOptions};

fn demo_submodel() -> Submodel {
    SubmodelBuilder::new("urn:example:sm:operational")
        .id_short("OperationalData")
        .elements(|e| {
            e.property("Status", DataTypeDefXsd::String, "running")
                .property("Speed", DataTypeDefXsd::Double, "1450.0")
                .collection("Sensors", |c| {
                    c.property("Temperature", DataTypeDefXsd::Double, "21.5")
                        .list("History", ElementKind::Property, |l| {
                            l.property(DataTypeDefXsd::Double, "20.9")
                                .property(DataTypeDefXsd::Double, "21.1")
                        })
                })
        })
        .build()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let mut submodel = demo_submodel();
    validate_submodel(&submodel).expect("demo submodel is valid");

    let before = read_value_only(&submodel, None, &ValueOnlyOptions::typed()).expect("read failed");
    println!("Before:\n{}", serde_json::to_string_pretty(&before).expect("serialize failed"));

    let Some(file) = args.next() else {
        println!("No value file given, nothing to apply");
        return;
    };
    let path = args
        .next()
        .map(|p| IdShortPath::parse(&p).expect("invalid idShort path"));

    let text = fs::read_to_string(&file).expect("failed to read value file");
    let json: serde_json::Value = serde_json::from_str(&text).expect("failed to parse JSON");

    match write_value_only(&mut submodel, path.as_ref(), &json) {
        Ok(()) => {
            let after =
                read_value_only(&submodel, None, &ValueOnlyOptions::typed()).expect("read failed");
            println!("After:\n{}", serde_json::to_string_pretty(&after).expect("serialize failed"));
        }
        Err(err) => println!("Rejected: {}", err),
    }
}
