use std::sync::Arc;

use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::{FromValue, TypeDescriptor};
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::registry::ConverterRegistry;

/// Single entry point for parameter conversion.
///
/// Holds an ordered, immutable converter chain and tries it front to back:
/// the first converter that reports `Converted` wins, later ones are never
/// consulted. Registration order is the only priority rule.
///
/// Cloning shares the chain. Safe to call from many threads at once;
/// nothing is written during a resolution.
#[derive(Clone)]
pub struct ConversionManager {
    converters: Arc<[Arc<dyn ParameterConverter>]>,
}

impl std::fmt::Debug for ConversionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionManager")
            .field("converters", &self.converter_names().collect::<Vec<_>>())
            .finish()
    }
}

impl ConversionManager {
    pub fn new(converters: Vec<Arc<dyn ParameterConverter>>) -> Self {
        Self {
            converters: converters.into(),
        }
    }

    /// Manager without converters. Every resolution is inapplicable.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Assemble the chain described by `config` from `registry` kinds.
    pub fn from_config(
        config: &EngineConfig,
        registry: &ConverterRegistry,
    ) -> Result<Self, EngineError> {
        let chain = registry.build_chain(&config.converters)?;
        tracing::info!(converters = chain.len(), "conversion chain assembled");
        Ok(Self::new(chain))
    }

    pub fn converters(&self) -> &[Arc<dyn ParameterConverter>] {
        &self.converters
    }

    pub fn converter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.converters.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Convert `source` into `target` for the parameter named `parameter`.
    ///
    /// - `Ok(Converted(v))`: first applicable converter's result.
    /// - `Ok(Inapplicable)`: no converter applied. Never an error: whether
    ///   an unbound parameter is fatal is the caller's decision.
    /// - `Err`: a converter defect, returned as-is. Also raised when a
    ///   converter claims success with a value `target` does not accept.
    pub fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        for converter in self.converters.iter() {
            tracing::trace!(
                converter = %converter.name(),
                parameter,
                target = %target,
                source = source.kind_name(),
                "trying converter"
            );

            let value = match converter.try_convert(source, target, parameter) {
                Ok(Conversion::Converted(value)) => value,
                Ok(Conversion::Inapplicable) => continue,
                Err(e) => {
                    tracing::error!(
                        converter = %converter.name(),
                        parameter,
                        target = %target,
                        error = %e,
                        "converter defect"
                    );
                    return Err(e);
                }
            };

            if !target.accepts(&value) {
                let e = ConverterError::contract(format!(
                    "converter '{}' produced {} for parameter '{parameter}' of type {target}",
                    converter.name(),
                    value.kind_name(),
                ));
                tracing::error!(converter = %converter.name(), parameter, error = %e, "converter defect");
                return Err(e);
            }

            tracing::debug!(converter = %converter.name(), parameter, target = %target, "converted");
            return Ok(Conversion::Converted(value));
        }

        tracing::debug!(
            parameter,
            target = %target,
            source = source.kind_name(),
            "no converter applied"
        );
        Ok(Conversion::Inapplicable)
    }

    /// Typed variant of [`try_convert`](Self::try_convert): the target
    /// descriptor comes from `T`. `Ok(None)` means inapplicable.
    pub fn convert<T: FromValue>(
        &self,
        source: &Value,
        parameter: &str,
    ) -> Result<Option<T>, ConverterError> {
        let target = T::descriptor();
        match self.try_convert(source, &target, parameter)? {
            Conversion::Converted(value) => T::from_value(value).map(Some).ok_or_else(|| {
                ConverterError::contract(format!(
                    "value for parameter '{parameter}' does not decode as {target}"
                ))
            }),
            Conversion::Inapplicable => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use paramconv_api::error::ErrorKind;

    use super::*;

    /// Converts anything into the target by fabricating a fixed value.
    struct AlwaysAccept {
        calls: AtomicUsize,
    }

    impl ParameterConverter for AlwaysAccept {
        fn name(&self) -> &str {
            "always_accept"
        }

        fn try_convert(
            &self,
            _source: &Value,
            _target: &TypeDescriptor,
            _parameter: &str,
        ) -> Result<Conversion, ConverterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Conversion::Converted(Value::Int64(7)))
        }
    }

    struct NeverApplicable {
        calls: AtomicUsize,
    }

    impl ParameterConverter for NeverApplicable {
        fn name(&self) -> &str {
            "never_applicable"
        }

        fn try_convert(
            &self,
            _source: &Value,
            _target: &TypeDescriptor,
            _parameter: &str,
        ) -> Result<Conversion, ConverterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Conversion::Inapplicable)
        }
    }

    struct Broken;

    impl ParameterConverter for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn try_convert(
            &self,
            _source: &Value,
            _target: &TypeDescriptor,
            _parameter: &str,
        ) -> Result<Conversion, ConverterError> {
            Err(ConverterError::invariant("lookup table corrupted"))
        }
    }

    /// Returns a fixed value for every request.
    struct Fixed(&'static str, Value);

    impl ParameterConverter for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn try_convert(
            &self,
            _source: &Value,
            _target: &TypeDescriptor,
            _parameter: &str,
        ) -> Result<Conversion, ConverterError> {
            Ok(Conversion::Converted(self.1.clone()))
        }
    }

    fn counting() -> (Arc<AlwaysAccept>, Arc<NeverApplicable>) {
        (
            Arc::new(AlwaysAccept { calls: AtomicUsize::new(0) }),
            Arc::new(NeverApplicable { calls: AtomicUsize::new(0) }),
        )
    }

    #[test]
    fn first_success_stops_the_chain() {
        let (first, second) = counting();
        let manager = ConversionManager::new(vec![first.clone(), second.clone()]);

        for source in [Value::from("x"), Value::Absent, Value::Bool(false)] {
            let result = manager.try_convert(&source, &TypeDescriptor::Int64, "p").unwrap();
            assert_eq!(result, Conversion::Converted(Value::Int64(7)));
        }
        assert_eq!(first.calls.load(Ordering::SeqCst), 3);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn inapplicable_converters_are_skipped_in_order() {
        let (accept, never) = counting();
        let manager = ConversionManager::new(vec![never.clone(), accept.clone()]);

        let result = manager.try_convert(&Value::Null, &TypeDescriptor::Int64, "p").unwrap();
        assert!(result.is_converted());
        assert_eq!(never.calls.load(Ordering::SeqCst), 1);
        assert_eq!(accept.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lowest_index_wins_among_overlapping_converters() {
        let manager = ConversionManager::new(vec![
            Arc::new(Fixed("a", Value::Int64(1))),
            Arc::new(Fixed("b", Value::Int64(2))),
        ]);
        let result = manager.try_convert(&Value::from("3"), &TypeDescriptor::Int64, "n").unwrap();
        assert_eq!(result, Conversion::Converted(Value::Int64(1)));
    }

    #[test]
    fn empty_chain_always_inapplicable() {
        let manager = ConversionManager::empty();
        assert!(manager.is_empty());
        for target in [TypeDescriptor::Int64, TypeDescriptor::optional(TypeDescriptor::Json)] {
            for source in [Value::Absent, Value::Null, Value::from("1")] {
                assert_eq!(
                    manager.try_convert(&source, &target, "p").unwrap(),
                    Conversion::Inapplicable
                );
            }
        }
    }

    #[test]
    fn no_match_is_not_an_error() {
        let (_, never) = counting();
        let manager = ConversionManager::new(vec![never.clone(), never.clone()]);
        let result = manager.try_convert(&Value::from("x"), &TypeDescriptor::Bool, "flag");
        assert_eq!(result, Ok(Conversion::Inapplicable));
        assert_eq!(never.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn defects_pass_through_unmodified_and_stop_the_chain() {
        let (accept, _) = counting();
        let manager = ConversionManager::new(vec![Arc::new(Broken), accept.clone()]);

        let err = manager
            .try_convert(&Value::from("1"), &TypeDescriptor::Int64, "p")
            .unwrap_err();
        assert_eq!(err, ConverterError::invariant("lookup table corrupted"));
        assert_eq!(accept.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn wrong_typed_success_is_a_contract_defect() {
        let manager = ConversionManager::new(vec![Arc::new(Fixed("liar", Value::from("7")))]);
        let err = manager
            .try_convert(&Value::from("7"), &TypeDescriptor::Int64, "count")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert!(err.message.contains("'liar'"));
        assert!(err.message.contains("count"));
    }

    #[test]
    fn converted_null_is_distinct_from_inapplicable() {
        let manager = ConversionManager::new(vec![Arc::new(Fixed("nulls", Value::Null))]);
        let target = TypeDescriptor::optional(TypeDescriptor::String);
        assert_eq!(
            manager.try_convert(&Value::Absent, &target, "p").unwrap(),
            Conversion::Converted(Value::Null)
        );
        assert_eq!(manager.convert::<Option<String>>(&Value::Absent, "p"), Ok(Some(None)));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let manager = ConversionManager::new(vec![Arc::new(Fixed("a", Value::Bool(true)))]);
        let first = manager.try_convert(&Value::from("y"), &TypeDescriptor::Bool, "p");
        let second = manager.try_convert(&Value::from("y"), &TypeDescriptor::Bool, "p");
        assert_eq!(first, second);
    }

    #[test]
    fn typed_convert_uses_descriptor_of_t() {
        let manager = ConversionManager::new(vec![Arc::new(Fixed("a", Value::Int64(5)))]);
        assert_eq!(manager.convert::<i64>(&Value::from("5"), "n"), Ok(Some(5)));
        // Fixed value does not match bool → contract defect, not None.
        assert!(manager.convert::<bool>(&Value::from("5"), "n").is_err());
        assert_eq!(ConversionManager::empty().convert::<i64>(&Value::from("5"), "n"), Ok(None));
    }

    #[test]
    fn manager_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConversionManager>();

        let (accept, never) = counting();
        let manager = ConversionManager::new(vec![never.clone(), accept.clone()]);
        std::thread::scope(|s| {
            for _ in 0..8 {
                let manager = manager.clone();
                s.spawn(move || {
                    for _ in 0..100 {
                        let r = manager.try_convert(&Value::Null, &TypeDescriptor::Int64, "p");
                        assert_eq!(r, Ok(Conversion::Converted(Value::Int64(7))));
                    }
                });
            }
        });
        assert_eq!(accept.calls.load(Ordering::SeqCst), 800);
        assert_eq!(never.calls.load(Ordering::SeqCst), 800);
    }

    #[test]
    fn debug_lists_converter_names() {
        let (accept, never) = counting();
        let manager = ConversionManager::new(vec![accept, never]);
        assert_eq!(
            format!("{manager:?}"),
            r#"ConversionManager { converters: ["always_accept", "never_applicable"] }"#
        );
    }
}
