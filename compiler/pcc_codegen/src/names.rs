//! Deterministic assembly label names.
//!
//! Overloads share a source name, so a method's label carries a hash of
//! its parameter types. String literals are labeled by a hash of their
//! content, so equal literals share one data block.

use std::hash::{Hash, Hasher};

use pcc_ir::Method;
use rustc_hash::FxHasher;

/// 32-bit FxHash of `text`. Stable across runs and platforms.
pub fn content_hash(text: &str) -> u32 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    truncate(hasher.finish())
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "labels only need the low 32 bits of the hash"
)]
fn truncate(hash: u64) -> u32 {
    hash as u32
}

/// The label a method is emitted under and called by.
///
/// `main` keeps its name. Every other method gets `<name><hash>` where the
/// hash is the wrapping sum of its parameter types' hashes.
pub fn method_uid(method: &Method) -> String {
    if method.is_main() {
        return method.name.clone();
    }
    let hash = method
        .params
        .iter()
        .map(|param| content_hash(&param.ty.to_string()))
        .fold(0u32, u32::wrapping_add);
    format!("{}{hash}", method.name)
}

/// The label of the data block holding a string literal.
pub fn string_label(content: &str) -> String {
    format!("__string{}", content_hash(content))
}

#[cfg(test)]
mod tests {
    use pcc_ir::{Mark, Param, Type};
    use pretty_assertions::assert_eq;

    use super::*;

    fn method(name: &str, params: &[Type]) -> Method {
        Method {
            name: name.to_string(),
            ret: Type::Void,
            params: params
                .iter()
                .enumerate()
                .map(|(i, ty)| Param {
                    ty: ty.clone(),
                    name: format!("p{i}"),
                })
                .collect(),
            body: None,
            mark: Mark::default(),
        }
    }

    #[test]
    fn test_main_keeps_its_name() {
        assert_eq!(method_uid(&method("main", &[])), "main");
    }

    #[test]
    fn test_overloads_get_distinct_labels() {
        let by_int = method_uid(&method("print", &[Type::Int]));
        let by_ptr = method_uid(&method("print", &[Type::Int.pointer_to()]));
        assert!(by_int.starts_with("print"));
        assert_ne!(by_int, by_ptr);
        assert_eq!(by_int, method_uid(&method("print", &[Type::Int])));
    }

    #[test]
    fn test_parameter_names_do_not_affect_label() {
        let mut renamed = method("f", &[Type::Int]);
        renamed.params[0].name = "other".to_string();
        assert_eq!(method_uid(&renamed), method_uid(&method("f", &[Type::Int])));
        assert_eq!(method_uid(&method("f", &[])), "f0");
    }

    #[test]
    fn test_equal_strings_share_a_label() {
        assert_eq!(string_label("hello"), string_label("hello"));
        assert_ne!(string_label("hello"), string_label("hello!"));
        assert!(string_label("").starts_with("__string"));
    }
}
