//! Final run statistics
//!
//! After replay completes the driver folds each allocator's metrics,
//! counters and sampled aggregates into one [`PolicyReport`] per policy,
//! collected in a [`RunReport`]. Rendering produces the per-policy
//! statistics blocks and the side-by-side comparison table; the CLI decides
//! where they go.
//!
//! All derived values use integer arithmetic (truncating division), so the
//! report is bit-for-bit reproducible across runs.

use crate::policy::PolicyKind;

/// Final statistics for one placement policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyReport {
    pub kind: PolicyKind,

    // Pool usage at the end of the run
    pub total_bytes: u64,
    pub allocated_bytes: u64,
    pub free_bytes: u64,
    pub required_bytes: u64,
    pub percent_in_use: u64,
    pub percent_free: u64,
    pub percent_internal_fragmentation: u64,
    pub largest_free_block_bytes: u64,
    pub smallest_free_block_bytes: u64,

    // Sampled aggregates
    pub avg_percent_in_use: u64,
    pub avg_percent_internal_fragmentation: u64,
    pub peak_percent_in_use: u64,
    pub peak_external_fragments: u64,

    // Heap traffic attributed to this policy during replay
    pub heap_alloc_count: u64,
    pub heap_alloc_bytes: u64,

    // Operation counters and derived cost metrics
    pub allocations: u64,
    pub failed_allocations: u64,
    pub allocation_operations: u64,
    pub avg_allocation_operations: u64,
    pub free_requests: u64,
    pub free_operations: u64,
    pub avg_free_operations: u64,
    pub total_operations: u64,
    pub operations_per_time_unit: u64,
}

impl PolicyReport {
    /// Render the human-readable statistics block for this policy.
    pub fn render_block(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Final statistics for {}:\n", self.kind.name()));
        out.push_str(&format!("Total memory bytes: {}\n", self.total_bytes));
        out.push_str(&format!("Allocated bytes: {}\n", self.allocated_bytes));
        out.push_str(&format!("Free bytes: {}\n", self.free_bytes));
        out.push_str(&format!("Required bytes: {}\n", self.required_bytes));
        out.push_str(&format!("Percent memory in use: {}\n", self.percent_in_use));
        out.push_str(&format!("Percent memory free: {}\n", self.percent_free));
        out.push_str(&format!(
            "Percent internal fragmentation: {}\n",
            self.percent_internal_fragmentation
        ));
        out.push_str(&format!(
            "Average percent memory in use (over samples): {}\n",
            self.avg_percent_in_use
        ));
        out.push_str(&format!(
            "Average percent internal fragmentation (over samples): {}\n",
            self.avg_percent_internal_fragmentation
        ));
        out.push_str(&format!(
            "Peak percent memory in use: {}\n",
            self.peak_percent_in_use
        ));
        out.push_str(&format!(
            "Peak external fragmentation (free blocks): {}\n",
            self.peak_external_fragments
        ));
        out.push_str(&format!(
            "Largest free block (bytes): {}\n",
            self.largest_free_block_bytes
        ));
        out.push_str(&format!(
            "Smallest free block (bytes): {}\n",
            self.smallest_free_block_bytes
        ));
        out.push_str(&format!(
            "Number of heap allocations: {}\n",
            self.heap_alloc_count
        ));
        out.push_str(&format!(
            "Total memory size of heap elements: {}\n",
            self.heap_alloc_bytes
        ));
        out.push_str(&format!("Number of allocations: {}\n", self.allocations));
        out.push_str(&format!(
            "Number of failed allocations: {}\n",
            self.failed_allocations
        ));
        out.push_str(&format!(
            "Number of allocation operations: {}\n",
            self.allocation_operations
        ));
        out.push_str(&format!(
            "Average allocation operations: {}\n",
            self.avg_allocation_operations
        ));
        out.push_str(&format!("Number of free requests: {}\n", self.free_requests));
        out.push_str(&format!(
            "Number of free operations: {}\n",
            self.free_operations
        ));
        out.push_str(&format!(
            "Average free operations: {}\n",
            self.avg_free_operations
        ));
        out.push_str(&format!(
            "Total allocation+free operations: {}\n",
            self.total_operations
        ));
        out.push_str(&format!(
            "Operations per time unit: {}\n",
            self.operations_per_time_unit
        ));
        out.push('\n');
        out
    }
}

/// Final statistics for the whole run, one entry per policy in dispatch
/// order (First, Next, Best, Worst).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub test_name: String,
    pub sample_count: u64,
    pub total_time_steps: u64,
    pub policies: Vec<PolicyReport>,
}

impl RunReport {
    /// Render all per-policy blocks followed by the comparison table.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for policy in &self.policies {
            out.push_str(&policy.render_block());
        }
        out.push_str(&self.render_comparison_table());
        out
    }

    /// Render the side-by-side comparison table (one metric per row, one
    /// column per policy).
    pub fn render_comparison_table(&self) -> String {
        let rows: [(&str, fn(&PolicyReport) -> u64); 24] = [
            ("Total memory bytes", |p| p.total_bytes),
            ("Allocated bytes", |p| p.allocated_bytes),
            ("Free bytes", |p| p.free_bytes),
            ("Required bytes", |p| p.required_bytes),
            ("Percent memory in use", |p| p.percent_in_use),
            ("Percent memory free", |p| p.percent_free),
            ("Percent internal fragmentation", |p| {
                p.percent_internal_fragmentation
            }),
            ("Average percent memory in use (samples)", |p| {
                p.avg_percent_in_use
            }),
            ("Average percent internal fragmentation (samples)", |p| {
                p.avg_percent_internal_fragmentation
            }),
            ("Peak percent memory in use", |p| p.peak_percent_in_use),
            ("Peak external fragmentation (free blocks)", |p| {
                p.peak_external_fragments
            }),
            ("Largest free block (bytes)", |p| p.largest_free_block_bytes),
            ("Smallest free block (bytes)", |p| p.smallest_free_block_bytes),
            ("Number of heap allocations", |p| p.heap_alloc_count),
            ("Total memory size of heap elements", |p| p.heap_alloc_bytes),
            ("Number of allocations", |p| p.allocations),
            ("Number of failed allocations", |p| p.failed_allocations),
            ("Number of allocation operations", |p| p.allocation_operations),
            ("Average allocation operations", |p| {
                p.avg_allocation_operations
            }),
            ("Number of free requests", |p| p.free_requests),
            ("Number of free operations", |p| p.free_operations),
            ("Average free operations", |p| p.avg_free_operations),
            ("Total allocation+free operations", |p| p.total_operations),
            ("Operations per time unit", |p| p.operations_per_time_unit),
        ];

        let mut out = String::new();
        out.push_str("Overall Comparison Table (per algorithm)\n");

        let codes: Vec<&str> = self.policies.iter().map(|p| p.kind.code()).collect();
        out.push_str(&format!("Metric,{}\n", codes.join(",")));

        for (label, value_of) in rows {
            out.push_str(label);
            for policy in &self.policies {
                out.push(',');
                out.push_str(&value_of(policy).to_string());
            }
            out.push('\n');
        }

        out
    }
}
