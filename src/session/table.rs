//! The "Heap State" address table printed by the console menu

use crate::memory::HeapState;

const RULE: &str = "+-------------+----------------+";

/// Render regions as an address table, allocation order top to bottom
pub fn render_heap_table(state: &HeapState) -> String {
    let mut out = String::new();
    out.push_str("Heap State:\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str("[*] Address   ->   Heap Data   \n");
    out.push_str(RULE);
    for region in &state.regions {
        out.push('\n');
        out.push_str(&format!(
            "[*]   0x{:08x}  ->   {}\n",
            region.address, region.value
        ));
        out.push_str(RULE);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::HeapModel;

    #[test]
    fn test_table_lists_regions_in_order() {
        let heap = HeapModel::reference().unwrap();
        let table = render_heap_table(&heap.describe_state());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Heap State:");
        assert_eq!(lines[4], "[*]   0x10000000  ->   Buffer1");
        assert_eq!(lines[6], "[*]   0x10000008  ->   Unbreakable!");
        assert_eq!(lines.len(), 8);
    }
}
