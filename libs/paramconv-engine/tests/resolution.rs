use std::sync::Arc;

use paramconv_api::config::{ConfigParam, ConfigValues};
use paramconv_engine::builtin::{self, StringToBool, StringToInt};
use paramconv_engine::{
    Conversion, ConversionManager, ConverterError, ConverterKind, ConverterRegistry,
    EngineConfig, EngineError, ParameterConverter, TypeDescriptor, Value,
};
use serde_json::json;

fn int_then_bool() -> ConversionManager {
    ConversionManager::new(vec![
        Arc::new(StringToInt::default()),
        Arc::new(StringToBool::default()),
    ])
}

#[test]
fn string_to_int_then_bool_binds_integers() {
    let manager = int_then_bool();
    assert_eq!(
        manager.try_convert(&Value::from("42"), &TypeDescriptor::Int64, "count"),
        Ok(Conversion::Converted(Value::Int64(42)))
    );
}

#[test]
fn string_to_int_then_bool_rejects_non_literal_bool() {
    let manager = int_then_bool();
    assert_eq!(
        manager.try_convert(&Value::from("42"), &TypeDescriptor::Bool, "enabled"),
        Ok(Conversion::Inapplicable)
    );
}

#[test]
fn default_chain_covers_common_bindings() {
    let manager = ConversionManager::new(builtin::default_chain());

    let cases: Vec<(Value, &str, Value)> = vec![
        (Value::Absent, "optional<int64>", Value::Null),
        (Value::from("17"), "int64", Value::Int64(17)),
        (Value::from("17"), "optional<uint64>", Value::UInt64(17)),
        (Value::from("1.25"), "float64", Value::Float64(1.25)),
        (Value::Int64(3), "float64", Value::Float64(3.0)),
        (Value::from("False"), "bool", Value::Bool(false)),
        (Value::Bytes(b"body".to_vec()), "string", Value::from("body")),
        (Value::from("raw"), "bytes", Value::Bytes(b"raw".to_vec())),
        (Value::from("text"), "string", Value::from("text")),
        (Value::from(r#"{"a":1}"#), "json", Value::Json(json!({"a": 1}))),
        (Value::from_json(json!([1, 2])), "json", Value::Json(json!([1, 2]))),
        (Value::Json(json!("abc")), "json", Value::Json(json!("abc"))),
        (
            Value::from_json(json!([1, 2])),
            "array<float64>",
            Value::Array(vec![Value::Float64(1.0), Value::Float64(2.0)]),
        ),
        (
            Value::from(r#"{"sku":"x"}"#),
            "named:OrderLine",
            Value::Record {
                type_name: "OrderLine".into(),
                body: json!({"sku": "x"}).as_object().cloned().unwrap(),
            },
        ),
        (
            Value::from("[true,false]"),
            "array<bool>",
            Value::Array(vec![Value::Bool(true), Value::Bool(false)]),
        ),
    ];

    for (source, target, expected) in cases {
        let target: TypeDescriptor = target.parse().unwrap();
        let result = manager.try_convert(&source, &target, "p").unwrap();
        assert_eq!(result, Conversion::Converted(expected), "{source:?} -> {target}");
    }
}

#[test]
fn default_chain_leaves_unbindable_parameters_unbound() {
    let manager = ConversionManager::new(builtin::default_chain());
    let cases = [
        (Value::Absent, "int64"),
        (Value::from("abc"), "int64"),
        (Value::from("yes"), "bool"),
        (Value::from("{"), "json"),
        (Value::Bool(true), "named:Order"),
        (Value::from("[9007199254740993]"), "array<float64>"),
        (Value::Int64(9007199254740993), "float64"),
    ];
    for (source, target) in cases {
        let target: TypeDescriptor = target.parse().unwrap();
        assert_eq!(
            manager.try_convert(&source, &target, "p"),
            Ok(Conversion::Inapplicable),
            "{source:?} -> {target}"
        );
    }
}

#[test]
fn chain_from_config_respects_order_and_settings() {
    let config = EngineConfig::parse(
        r#"
        [[converters]]
        kind = "string_to_bool"
        [converters.config]
        truthy = ["yes", "1"]
        falsy = ["no", "0"]

        [[converters]]
        kind = "string_to_int"
        "#,
    )
    .unwrap();
    let manager = ConversionManager::from_config(&config, &ConverterRegistry::builtin()).unwrap();

    assert_eq!(manager.converter_names().collect::<Vec<_>>(), ["string_to_bool", "string_to_int"]);
    assert_eq!(manager.convert::<bool>(&Value::from("YES"), "flag"), Ok(Some(true)));
    assert_eq!(manager.convert::<bool>(&Value::from("true"), "flag"), Ok(None));
    assert_eq!(manager.convert::<i64>(&Value::from("1"), "n"), Ok(Some(1)));
}

#[test]
fn config_errors_name_the_converter() {
    let config = EngineConfig::parse(
        r#"
        [[converters]]
        kind = "bytes_text"
        [converters.config]
        encoding = "latin1"
        "#,
    )
    .unwrap();
    let err = ConversionManager::from_config(&config, &ConverterRegistry::builtin()).unwrap_err();
    assert!(matches!(err, EngineError::Converter(_)));
    assert!(err.to_string().contains("converter #0 'bytes_text'"));

    let config = EngineConfig::parse("[[converters]]\nkind = \"nope\"").unwrap();
    let err = ConversionManager::from_config(&config, &ConverterRegistry::builtin()).unwrap_err();
    assert!(matches!(err, EngineError::UnknownConverter(ref k) if k == "nope"));
}

/// Application-defined converter registered next to the built-ins.
struct UpperCase;

impl ParameterConverter for UpperCase {
    fn name(&self) -> &str {
        "upper_case"
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        match (source, target) {
            (Value::String(s), TypeDescriptor::String) => {
                Ok(Conversion::Converted(Value::String(s.to_uppercase())))
            }
            _ => Ok(Conversion::Inapplicable),
        }
    }
}

fn upper_case_params() -> Vec<ConfigParam> {
    Vec::new()
}

fn create_upper_case(
    _config: &ConfigValues,
) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    Ok(Arc::new(UpperCase))
}

#[test]
fn registration_order_decides_between_overlapping_converters() {
    let mut registry = ConverterRegistry::builtin();
    registry
        .register(ConverterKind {
            name: "upper_case",
            config_params: upper_case_params,
            create: create_upper_case,
        })
        .unwrap();

    let first = EngineConfig::parse(
        "[[converters]]\nkind = \"upper_case\"\n[[converters]]\nkind = \"identity\"",
    )
    .unwrap();
    let manager = ConversionManager::from_config(&first, &registry).unwrap();
    assert_eq!(manager.convert::<String>(&Value::from("ab"), "s"), Ok(Some("AB".into())));

    let second = EngineConfig::parse(
        "[[converters]]\nkind = \"identity\"\n[[converters]]\nkind = \"upper_case\"",
    )
    .unwrap();
    let manager = ConversionManager::from_config(&second, &registry).unwrap();
    assert_eq!(manager.convert::<String>(&Value::from("ab"), "s"), Ok(Some("ab".into())));
}

#[test]
fn concurrent_resolution_is_consistent() {
    let manager = ConversionManager::from_config(&EngineConfig::default(), &ConverterRegistry::builtin())
        .unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let manager = manager.clone();
            std::thread::spawn(move || {
                (0..250)
                    .map(|n| {
                        let text = (i * 1000 + n).to_string();
                        manager.convert::<i64>(&Value::from(text.as_str()), "n")
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let results = handle.join().unwrap();
        for (n, result) in results.into_iter().enumerate() {
            assert_eq!(result, Ok(Some((i * 1000 + n) as i64)));
        }
    }
}
