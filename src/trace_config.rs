//! Built-in descriptors for the trace config schema.
//!
//! This is the schema the `trace_config_txt_to_pb` entry point compiles
//! against. Field numbers match the trace config protos, so output decodes
//! with any protobuf reader bound to the same schema. `TestConfig` and its
//! `DummyFields` carry one field of every wire kind and exist to exercise
//! the compiler end to end.

use crate::schema::{DescriptorPool, EnumDescriptor, FieldDescriptor, FieldKind, MessageDescriptor};

/// Build the trace config descriptor pool. The pool is immutable once
/// built; callers may share one across concurrent compiles.
pub fn descriptor_pool() -> DescriptorPool {
    let mut pool = DescriptorPool::new();

    let fill_policy = pool.add_enum(EnumDescriptor::new(
        "FillPolicy",
        [("UNSPECIFIED", 0), ("RING_BUFFER", 1), ("DISCARD", 2)],
    ));
    let compression_type = pool.add_enum(EnumDescriptor::new(
        "CompressionType",
        [
            ("COMPRESSION_TYPE_UNSPECIFIED", 0),
            ("COMPRESSION_TYPE_DEFLATE", 1),
        ],
    ));

    let mount_point_mapping = pool.add_message(MessageDescriptor::new(
        "MountPointMappingEntry",
        vec![
            FieldDescriptor::new("mountpoint", 1, FieldKind::String),
            FieldDescriptor::repeated("scan_roots", 2, FieldKind::String),
        ],
    ));

    let inode_file_config = pool.add_message(MessageDescriptor::new(
        "InodeFileConfig",
        vec![
            FieldDescriptor::new("scan_interval_ms", 1, FieldKind::Uint32),
            FieldDescriptor::new("scan_delay_ms", 2, FieldKind::Uint32),
            FieldDescriptor::new("scan_batch_size", 3, FieldKind::Uint32),
            FieldDescriptor::repeated(
                "mount_point_mapping",
                5,
                FieldKind::Message(mount_point_mapping),
            ),
        ],
    ));

    let ftrace_config = pool.add_message(MessageDescriptor::new(
        "FtraceConfig",
        vec![
            FieldDescriptor::repeated("ftrace_events", 1, FieldKind::String),
            FieldDescriptor::repeated("atrace_categories", 2, FieldKind::String),
            FieldDescriptor::repeated("atrace_apps", 3, FieldKind::String),
            FieldDescriptor::new("buffer_size_kb", 10, FieldKind::Uint32),
            FieldDescriptor::new("drain_period_ms", 11, FieldKind::Uint32),
        ],
    ));

    let dummy_fields = pool.add_message(MessageDescriptor::new(
        "DummyFields",
        vec![
            FieldDescriptor::new("field_uint32", 1, FieldKind::Uint32),
            FieldDescriptor::new("field_uint64", 2, FieldKind::Uint64),
            FieldDescriptor::new("field_int32", 3, FieldKind::Int32),
            FieldDescriptor::new("field_int64", 4, FieldKind::Int64),
            FieldDescriptor::new("field_fixed64", 5, FieldKind::Fixed64),
            FieldDescriptor::new("field_sfixed64", 6, FieldKind::Sfixed64),
            FieldDescriptor::new("field_fixed32", 7, FieldKind::Fixed32),
            FieldDescriptor::new("field_sfixed32", 8, FieldKind::Sfixed32),
            FieldDescriptor::new("field_double", 9, FieldKind::Double),
            FieldDescriptor::new("field_float", 10, FieldKind::Float),
            FieldDescriptor::new("field_sint64", 11, FieldKind::Sint64),
            FieldDescriptor::new("field_sint32", 12, FieldKind::Sint32),
            FieldDescriptor::new("field_string", 13, FieldKind::String),
            FieldDescriptor::new("field_bytes", 14, FieldKind::Bytes),
        ],
    ));

    let test_config = pool.add_message(MessageDescriptor::new(
        "TestConfig",
        vec![
            FieldDescriptor::new("message_count", 1, FieldKind::Uint32),
            FieldDescriptor::new("max_messages_per_second", 2, FieldKind::Uint32),
            FieldDescriptor::new("seed", 3, FieldKind::Uint32),
            FieldDescriptor::new("dummy_fields", 6, FieldKind::Message(dummy_fields)),
        ],
    ));

    let data_source_config = pool.add_message(MessageDescriptor::new(
        "DataSourceConfig",
        vec![
            FieldDescriptor::new("name", 1, FieldKind::String),
            FieldDescriptor::new("target_buffer", 2, FieldKind::Uint32),
            FieldDescriptor::new("trace_duration_ms", 3, FieldKind::Uint32),
            FieldDescriptor::new("ftrace_config", 100, FieldKind::Message(ftrace_config)),
            FieldDescriptor::new(
                "inode_file_config",
                102,
                FieldKind::Message(inode_file_config),
            ),
            FieldDescriptor::new("for_testing", 1001, FieldKind::Message(test_config)),
        ],
    ));

    let data_source = pool.add_message(MessageDescriptor::new(
        "DataSource",
        vec![
            FieldDescriptor::new("config", 1, FieldKind::Message(data_source_config)),
            FieldDescriptor::repeated("producer_name_filter", 2, FieldKind::String),
        ],
    ));

    let buffer_config = pool.add_message(MessageDescriptor::new(
        "BufferConfig",
        vec![
            FieldDescriptor::new("size_kb", 1, FieldKind::Uint32),
            FieldDescriptor::new("fill_policy", 4, FieldKind::Enum(fill_policy)),
        ],
    ));

    let producer_config = pool.add_message(MessageDescriptor::new(
        "ProducerConfig",
        vec![
            FieldDescriptor::new("producer_name", 1, FieldKind::String),
            FieldDescriptor::new("shm_size_kb", 2, FieldKind::Uint32),
            FieldDescriptor::new("page_size_kb", 3, FieldKind::Uint32),
        ],
    ));

    pool.add_message(MessageDescriptor::new(
        "TraceConfig",
        vec![
            FieldDescriptor::repeated("buffers", 1, FieldKind::Message(buffer_config)),
            FieldDescriptor::repeated("data_sources", 2, FieldKind::Message(data_source)),
            FieldDescriptor::new("duration_ms", 3, FieldKind::Uint32),
            FieldDescriptor::new("enable_extra_guardrails", 4, FieldKind::Bool),
            FieldDescriptor::repeated("producers", 6, FieldKind::Message(producer_config)),
            FieldDescriptor::new("write_into_file", 8, FieldKind::Bool),
            FieldDescriptor::new("file_write_period_ms", 9, FieldKind::Uint32),
            FieldDescriptor::new("max_file_size_bytes", 10, FieldKind::Uint64),
            FieldDescriptor::new("deferred_start", 12, FieldKind::Bool),
            FieldDescriptor::new("flush_period_ms", 13, FieldKind::Uint32),
            FieldDescriptor::new("compression_type", 24, FieldKind::Enum(compression_type)),
        ],
    ));

    pool
}
