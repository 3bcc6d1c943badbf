//! Human readable dumps of the frequency table, code table and tree.

use std::fmt::Write;

use crate::compression::compress::Compressed;
use crate::huffman_coding::codes::CodeTable;
use crate::huffman_coding::huffman::{Node, NodeData};
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::freq_count::SymbolFreq;

/// Printable ASCII shows as the character, anything else as its number.
fn symbol_label(symbol: u8) -> String {
    if (32..=126).contains(&symbol) {
        format!("'{}' (ASCII {:3})", symbol as char, symbol)
    } else {
        format!("ASCII {:3}", symbol)
    }
}

pub fn freq_table_report(table: &[SymbolFreq]) -> String {
    let mut s = format!("Frequency table ({} unique symbols):\n", table.len());
    for sf in table {
        let _ = writeln!(s, "  {}: {} times", symbol_label(sf.symbol), sf.freq);
    }
    s
}

pub fn code_table_report(codes: &CodeTable) -> String {
    let mut s = String::from("Huffman codes:\n");
    for (symbol, code) in codes.iter() {
        let _ = writeln!(s, "  {}: {}", symbol_label(symbol), code);
    }
    s
}

pub fn tree_report(tree: &HuffmanTree) -> String {
    fn node_report(s: &mut String, node: &Node, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        match &node.node_data {
            NodeData::Leaf(symbol) => {
                let _ = writeln!(
                    s,
                    "{}{}-> Leaf: {} [weight: {}]",
                    indent,
                    label,
                    symbol_label(*symbol),
                    node.weight
                );
            }
            NodeData::Kids(left, right) => {
                let _ = writeln!(s, "{}{}-> Internal [weight: {}]", indent, label, node.weight);
                node_report(s, left, depth + 1, "L");
                node_report(s, right, depth + 1, "R");
            }
        }
    }
    let mut s = String::from("Huffman tree structure:\n");
    node_report(&mut s, tree.root(), 0, "root");
    s
}

/// One line summary of sizes and ratio for a finished compression.
pub fn size_report(compressed: &Compressed) -> String {
    let original = compressed.summary.symbols_read;
    let written = compressed.summary.bytes_written;
    let ratio = if original == 0 {
        0.0
    } else {
        written as f64 / original as f64 * 100.0
    };
    format!(
        "{} bytes -> {} bytes ({} payload bits, {:.1}% of original)",
        original, written, compressed.summary.payload_bits, ratio
    )
}
