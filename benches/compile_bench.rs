//! Benchmarks for the text-to-wire compiler.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tracecfg::{trace_config, trace_config_txt_to_pb};

const EXAMPLE_CONFIG: &str = r#"
buffers {
  size_kb: 100024
  fill_policy: RING_BUFFER
}

data_sources {
  config {
    name: "linux.ftrace"
    target_buffer: 0
    ftrace_config {
      buffer_size_kb: 512
      drain_period_ms: 200
      ftrace_events: "binder_lock"
      ftrace_events: "binder_locked"
      atrace_categories: "gfx"
    }
  }
}

data_sources {
  config {
    name: "linux.process_stats"
    target_buffer: 0
  }
}

producers {
  producer_name: "perfetto.traced_probes"
  shm_size_kb: 4096
  page_size_kb: 4
}

duration_ms: 10000
"#;

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    group.throughput(Throughput::Bytes(EXAMPLE_CONFIG.len() as u64));

    group.bench_function("example_config", |b| {
        b.iter(|| trace_config_txt_to_pb(black_box(EXAMPLE_CONFIG)).unwrap())
    });

    // Pool construction dominates tiny inputs; measure the compile alone
    // with a shared pool.
    let pool = trace_config::descriptor_pool();
    group.bench_function("example_config_shared_pool", |b| {
        b.iter(|| tracecfg::compile(&pool, "TraceConfig", black_box(EXAMPLE_CONFIG)).unwrap())
    });

    group.bench_function("single_field", |b| {
        b.iter(|| tracecfg::compile(&pool, "TraceConfig", black_box("duration_ms: 1234")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
