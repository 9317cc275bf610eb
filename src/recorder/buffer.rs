//! Per-sensor sample queues
//!
//! The buffer holds every not-yet-written sample as one FIFO queue per
//! `(component, sensor)` pair. Queues are unbounded on purpose: growth is
//! countered by the capture driver's flush policy, not by a cap here.

use crate::sensors::{SensorRef, Topology};
use std::collections::VecDeque;
use std::mem::size_of;

/// Two-dimensional collection of per-sensor FIFO queues.
///
/// The shape (component count, per-component sensor count) is fixed by
/// [`initialize`](SampleBuffer::initialize) and matches the hardware topology
/// at that point. Samples leave the buffer only through sweeps; there is no
/// random-access removal.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    queues: Vec<Vec<VecDeque<f32>>>,
}

impl SampleBuffer {
    /// Create an empty, shapeless buffer. [`initialize`](Self::initialize)
    /// must run before any push or sweep.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate one empty queue per sensor of the topology.
    ///
    /// Re-initializing discards any unflushed samples.
    pub fn initialize(&mut self, topology: &Topology) {
        self.initialize_shape(&topology.shape());
    }

    /// Allocate from an explicit per-component sensor-count list
    pub fn initialize_shape(&mut self, shape: &[usize]) {
        self.queues = shape
            .iter()
            .map(|&sensors| (0..sensors).map(|_| VecDeque::new()).collect())
            .collect();
    }

    /// Append a sample to the queue for `r`.
    ///
    /// References outside the initialized shape are ignored; the shape never
    /// grows after initialization.
    pub fn push(&mut self, r: SensorRef, value: f32) {
        if let Some(queue) = self
            .queues
            .get_mut(r.component)
            .and_then(|c| c.get_mut(r.sensor))
        {
            queue.push_back(value);
        }
    }

    /// One pass over all queues in topology order, popping the front of every
    /// non-empty queue.
    ///
    /// Queues that ran dry contribute nothing, so rows shrink as queues empty
    /// rather than being padded with placeholders.
    pub fn sweep(&mut self) -> Vec<f32> {
        let mut row = Vec::new();
        for component in &mut self.queues {
            for queue in component {
                if let Some(value) = queue.pop_front() {
                    row.push(value);
                }
            }
        }
        row
    }

    /// Repeated sweeps until every queue is empty, one row per sweep
    pub fn drain_all(&mut self) -> Vec<Vec<f32>> {
        let mut rows = Vec::new();
        loop {
            let row = self.sweep();
            if row.is_empty() {
                break;
            }
            rows.push(row);
        }
        rows
    }

    /// True only when every queue is empty
    pub fn is_empty(&self) -> bool {
        self.queues
            .iter()
            .all(|component| component.iter().all(|queue| queue.is_empty()))
    }

    /// Total number of buffered samples across all queues
    pub fn len(&self) -> usize {
        self.queues
            .iter()
            .map(|component| component.iter().map(|queue| queue.len()).sum::<usize>())
            .sum()
    }

    /// Approximate in-memory size of the buffer structure itself.
    ///
    /// Counts the container headers and the allocated capacity of every
    /// queue. This structural measure is the flush-policy input; it is a
    /// coarse backpressure signal, not a precise memory budget.
    pub fn footprint_bytes(&self) -> usize {
        let mut bytes = size_of::<Self>();
        bytes += self.queues.capacity() * size_of::<Vec<VecDeque<f32>>>();
        for component in &self.queues {
            bytes += component.capacity() * size_of::<VecDeque<f32>>();
            for queue in component {
                bytes += queue.capacity() * size_of::<f32>();
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_2x2() -> SampleBuffer {
        let mut buffer = SampleBuffer::new();
        buffer.initialize_shape(&[2, 2]);
        buffer
    }

    #[test]
    fn test_ragged_queues_align_row_by_row() {
        let mut buffer = buffer_2x2();
        let a = SensorRef::new(0, 0);
        let b = SensorRef::new(1, 1);

        buffer.push(a, 1.0);
        buffer.push(a, 2.0);
        buffer.push(a, 3.0);
        buffer.push(b, 10.0);

        let rows = buffer.drain_all();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![1.0, 10.0]);
        // B exhausted after the first sweep; later rows carry only A
        assert_eq!(rows[1], vec![2.0]);
        assert_eq!(rows[2], vec![3.0]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sweep_preserves_topology_order() {
        let mut buffer = buffer_2x2();
        buffer.push(SensorRef::new(1, 0), 3.0);
        buffer.push(SensorRef::new(0, 1), 2.0);
        buffer.push(SensorRef::new(1, 1), 4.0);
        buffer.push(SensorRef::new(0, 0), 1.0);

        assert_eq!(buffer.sweep(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_drain_empty_produces_no_rows() {
        let mut buffer = buffer_2x2();
        assert!(buffer.is_empty());
        assert!(buffer.drain_all().is_empty());
        assert!(buffer.sweep().is_empty());
    }

    #[test]
    fn test_reinitialize_discards_samples() {
        let mut buffer = buffer_2x2();
        buffer.push(SensorRef::new(0, 0), 1.0);
        assert!(!buffer.is_empty());

        buffer.initialize_shape(&[2, 2]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_out_of_shape_push_is_ignored() {
        let mut buffer = buffer_2x2();
        buffer.push(SensorRef::new(5, 0), 1.0);
        buffer.push(SensorRef::new(0, 5), 1.0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_footprint_tracks_queue_growth() {
        let mut buffer = buffer_2x2();
        let before = buffer.footprint_bytes();
        for i in 0..1024 {
            buffer.push(SensorRef::new(0, 0), i as f32);
        }
        assert!(buffer.footprint_bytes() > before);
    }

    #[test]
    fn test_len_counts_all_queues() {
        let mut buffer = buffer_2x2();
        buffer.push(SensorRef::new(0, 0), 1.0);
        buffer.push(SensorRef::new(0, 0), 2.0);
        buffer.push(SensorRef::new(1, 1), 3.0);
        assert_eq!(buffer.len(), 3);
    }
}
