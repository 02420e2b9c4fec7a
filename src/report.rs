//! Console report for a finished analysis: the two counter blocks, the
//! grand totals with their ratio and the projected storage table.

use std::io::{self, Write};

use crate::analysis::CommAnalysis;

/// Write a labelled counter block, ten values per row.
pub fn write_counter<W: Write>(out: &mut W, name: &str, counter: &[u64]) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "{name}")?;
    for (p, value) in counter.iter().enumerate() {
        if p % 10 == 0 {
            writeln!(out)?;
        }
        write!(out, "{value} ")?;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Write the full report: counters, totals, ratio and the projected
/// memory cost for polynomial orders 1 through 8.
pub fn write_report<W: Write>(out: &mut W, analysis: &CommAnalysis) -> io::Result<()> {
    write_counter(out, "Edge cut", analysis.edge_cut())?;
    write_counter(out, "Communication volume", analysis.comm_volume())?;

    writeln!(out, "Total edge cut: {}", analysis.total_edge_cut())?;
    writeln!(
        out,
        "Total communication volume: {}",
        analysis.total_comm_volume()
    )?;
    writeln!(out, "Ratio: {}", analysis.ratio())?;
    writeln!(out)?;

    writeln!(out, "Order\t\tEdge cut (MB)\tComm volume (MB)")?;
    for order in 1..=8 {
        let (cut_mb, volume_mb) = analysis.projected_cost_mb(order);
        writeln!(out, "{order}\t\t{cut_mb}\t\t{volume_mb}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_rows_of_ten() {
        // Arrange
        let counter: Vec<u64> = (0..12).collect();

        // Act
        let mut out = Vec::new();
        write_counter(&mut out, "Edge cut", &counter).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        // Assert
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Edge cut");
        assert_eq!(lines[2].split_whitespace().count(), 10);
        assert_eq!(lines[3], "10 11 ");
    }

    #[test]
    fn test_report_totals_and_order_table() {
        // Arrange: the two-partition shared-boundary scenario.
        let mut analysis = CommAnalysis::new(2);
        analysis.scan_partition(0, &[0, 0, 0, 1]);
        analysis.scan_partition(1, &[1, 1, 1, 0]);

        // Act
        let mut out = Vec::new();
        write_report(&mut out, &analysis).unwrap();
        let output = String::from_utf8(out).unwrap();

        // Assert
        assert!(output.contains("Edge cut\n1 1 "));
        assert!(output.contains("Communication volume\n1 1 "));
        assert!(output.contains("Total edge cut: 2\n"));
        assert!(output.contains("Total communication volume: 2\n"));
        assert!(output.contains("Ratio: 1\n"));
        assert!(output.contains("Order\t\tEdge cut (MB)\tComm volume (MB)\n"));
        let table_rows = output
            .lines()
            .filter(|line| line.starts_with(char::is_numeric) && line.contains('\t'))
            .count();
        assert_eq!(table_rows, 8);
    }

    #[test]
    fn test_report_degenerate_ratio_is_printed() {
        let mut analysis = CommAnalysis::new(1);
        analysis.scan_partition(0, &[0, 0, 0, 0]);

        let mut out = Vec::new();
        write_report(&mut out, &analysis).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Ratio: NaN\n"));
    }
}
