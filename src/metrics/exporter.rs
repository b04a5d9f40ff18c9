use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Writes snapshots in the Prometheus text exposition format.
///
/// ```
/// use evictkit::metrics::exporter::PrometheusTextExporter;
/// use evictkit::metrics::snapshot::CacheMetricsSnapshot;
/// use evictkit::metrics::traits::MetricsExporter;
///
/// let exporter = PrometheusTextExporter::new("evictkit", Vec::new());
/// exporter.export(&CacheMetricsSnapshot { get_hits: 2, ..Default::default() });
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("evictkit_get_hits_total 2"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }

    fn write_metric(&self, writer: &mut W, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }
}

impl<W: Write + Send> MetricsExporter<CacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheMetricsSnapshot) {
        let counters = [
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("insert_calls_total", snapshot.insert_calls),
            ("insert_updates_total", snapshot.insert_updates),
            ("insert_new_total", snapshot.insert_new),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("pop_calls_total", snapshot.pop_calls),
            ("pop_found_total", snapshot.pop_found),
            ("remove_calls_total", snapshot.remove_calls),
            ("remove_found_total", snapshot.remove_found),
            ("clear_calls_total", snapshot.clear_calls),
        ];
        let gauges = [
            ("cache_len", snapshot.cache_len as u64),
            ("max_entries", snapshot.max_entries as u64),
        ];

        let mut writer = self.writer.lock();
        for (suffix, value) in counters {
            self.write_metric(&mut *writer, "counter", suffix, value);
        }
        for (suffix, value) in gauges {
            self.write_metric(&mut *writer, "gauge", suffix, value);
        }
        let _ = writer.flush();
    }
}
