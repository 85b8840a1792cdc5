//! Tracecfg: a compiler from proto-text trace configs to protobuf wire format.
//!
//! The compiler is driven entirely by runtime schema descriptors (field
//! names, wire kinds, enum value tables, nested message links) instead of
//! generated per-message code: a recursive-descent parser resolves each
//! `field: value` pair against the descriptors and emits wire-format bytes
//! directly, recursing into nested messages and length-prefixing them once
//! their extent is known. The first inconsistency aborts the compile with a
//! position-tagged diagnostic.
//!
//! # Quick Start
//!
//! ```rust
//! let config = tracecfg::trace_config_txt_to_pb(r#"
//!     duration_ms: 10000
//!     buffers: {
//!         size_kb: 1024
//!         fill_policy: RING_BUFFER
//!     }
//! "#).unwrap();
//! assert!(!config.is_empty());
//! ```
//!
//! Custom schemas work the same way through an explicit descriptor pool:
//!
//! ```rust
//! use tracecfg::schema::{DescriptorPool, FieldDescriptor, FieldKind, MessageDescriptor};
//!
//! let mut pool = DescriptorPool::new();
//! pool.add_message(MessageDescriptor::new(
//!     "Sample",
//!     vec![FieldDescriptor::new("value", 1, FieldKind::Uint32)],
//! ));
//!
//! let bytes = tracecfg::compile(&pool, "Sample", "value: 7").unwrap();
//! assert_eq!(bytes, [0x08, 0x07]);
//! ```

pub mod compiler;
pub mod error;
pub mod schema;
pub mod trace_config;
pub mod wire;

pub use compiler::compile;
pub use error::{CompileError, ErrorDetail};
pub use schema::{DescriptorPool, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor};

/// Compile proto-text against the built-in trace config schema.
pub fn trace_config_txt_to_pb(input: &str) -> Result<Vec<u8>, CompileError> {
    let pool = trace_config::descriptor_pool();
    compile(&pool, "TraceConfig", input)
}
