// Descriptions and complexity tables shown next to each visualization

use super::searching::SearchAlgorithm;
use super::sorting::SortAlgorithm;
use crate::structures::{CollisionStrategy, HeapKind};

/// What the info pane is describing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Sort(SortAlgorithm),
    Search(SearchAlgorithm),
    Tree,
    Heap(HeapKind),
    Stack,
    Queue,
    HashTable(CollisionStrategy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [&'static [&'static str]],
}

const CASE_COLUMNS: &[&str] = &["Case", "Time Complexity"];

const QUADRATIC_ADAPTIVE: &[&[&str]] = &[
    &["Best", "O(n)"],
    &["Average", "O(n²)"],
    &["Worst", "O(n²)"],
    &["Space", "O(1)"],
];

pub fn entry(topic: Topic) -> CatalogEntry {
    match topic {
        Topic::Sort(algorithm) => sort_entry(algorithm),
        Topic::Search(SearchAlgorithm::Linear) => CatalogEntry {
            title: "Linear Search",
            description: "Linear Search checks each element sequentially until the target is found or the end is reached.",
            columns: CASE_COLUMNS,
            rows: &[
                &["Best", "O(1)"],
                &["Average", "O(n)"],
                &["Worst", "O(n)"],
                &["Space", "O(1)"],
            ],
        },
        Topic::Search(SearchAlgorithm::Binary) => CatalogEntry {
            title: "Binary Search",
            description: "Binary Search repeatedly divides the sorted array in half, comparing the target with the middle element.",
            columns: CASE_COLUMNS,
            rows: &[
                &["Best", "O(1)"],
                &["Average", "O(log n)"],
                &["Worst", "O(log n)"],
                &["Space", "O(1)"],
            ],
        },
        Topic::Tree => CatalogEntry {
            title: "Binary Search Tree",
            description: "A binary tree is a hierarchical data structure where each node has at most two children. Smaller values go left, larger values go right.",
            columns: &["Operation", "Average", "Worst"],
            rows: &[
                &["Search", "O(log n)", "O(n)"],
                &["Insert", "O(log n)", "O(n)"],
                &["Delete", "O(log n)", "O(n)"],
                &["Space", "O(n)", "O(n)"],
            ],
        },
        Topic::Heap(kind) => CatalogEntry {
            title: match kind {
                HeapKind::Max => "Max Heap",
                HeapKind::Min => "Min Heap",
            },
            description: match kind {
                HeapKind::Max => "A max heap is a complete binary tree that satisfies the heap property: parent nodes are greater than or equal to their children.",
                HeapKind::Min => "A min heap is a complete binary tree that satisfies the heap property: parent nodes are less than or equal to their children.",
            },
            columns: &["Operation", "Time Complexity"],
            rows: &[
                &["Insert", "O(log n)"],
                &["Delete Root", "O(log n)"],
                &["Peek Root", "O(1)"],
                &["Build Heap", "O(n)"],
                &["Space", "O(n)"],
            ],
        },
        Topic::Stack => CatalogEntry {
            title: "Stack",
            description: "A stack is a Last-In-First-Out (LIFO) structure: elements are added and removed at the top.",
            columns: &["Operation", "Time", "Description"],
            rows: &[
                &["Push", "O(1)", "Add element to top"],
                &["Pop", "O(1)", "Remove element from top"],
                &["Peek", "O(1)", "View top element"],
                &["IsEmpty", "O(1)", "Check if stack is empty"],
                &["Size", "O(1)", "Get number of elements"],
                &["Space", "O(n)", "Linear space for n elements"],
            ],
        },
        Topic::Queue => CatalogEntry {
            title: "Queue",
            description: "A queue is a First-In-First-Out (FIFO) structure: elements join at the rear and leave from the front.",
            columns: &["Operation", "Time", "Description"],
            rows: &[
                &["Enqueue", "O(1)", "Add element to rear"],
                &["Dequeue", "O(1)", "Remove element from front"],
                &["Front", "O(1)", "View front element"],
                &["Rear", "O(1)", "View rear element"],
                &["IsEmpty", "O(1)", "Check if queue is empty"],
                &["Size", "O(1)", "Get number of elements"],
                &["Space", "O(n)", "Linear space for n elements"],
            ],
        },
        Topic::HashTable(strategy) => CatalogEntry {
            title: "Hash Table",
            description: match strategy {
                CollisionStrategy::LinearProbing => "A hash table uses a hash function to map keys to indices in an array. Linear probing resolves collisions by finding the next available slot.",
                CollisionStrategy::Chaining => "A hash table uses a hash function to map keys to indices in an array. Chaining resolves collisions by storing multiple items in a list at each slot.",
            },
            columns: &["Operation", "Average", "Worst"],
            rows: &[
                &["Insert", "O(1)", "O(n)"],
                &["Search", "O(1)", "O(n)"],
                &["Delete", "O(1)", "O(n)"],
                &["Space", "O(n)", "O(n)"],
            ],
        },
    }
}

const SELECTION_ROWS: &[&[&str]] = &[
    &["Best", "O(n²)"],
    &["Average", "O(n²)"],
    &["Worst", "O(n²)"],
    &["Space", "O(1)"],
];

const MERGE_ROWS: &[&[&str]] = &[
    &["Best", "O(n log n)"],
    &["Average", "O(n log n)"],
    &["Worst", "O(n log n)"],
    &["Space", "O(n)"],
];

const QUICK_ROWS: &[&[&str]] = &[
    &["Best", "O(n log n)"],
    &["Average", "O(n log n)"],
    &["Worst", "O(n²)"],
    &["Space", "O(log n)"],
];

const HEAP_SORT_ROWS: &[&[&str]] = &[
    &["Best", "O(n log n)"],
    &["Average", "O(n log n)"],
    &["Worst", "O(n log n)"],
    &["Space", "O(1)"],
];

fn sort_entry(algorithm: SortAlgorithm) -> CatalogEntry {
    let (description, rows) = match algorithm {
        SortAlgorithm::Bubble => (
            "Bubble Sort repeatedly steps through the list, compares adjacent elements and swaps them if they're in the wrong order.",
            QUADRATIC_ADAPTIVE,
        ),
        SortAlgorithm::Selection => (
            "Selection Sort finds the minimum element and places it at the beginning, then repeats for the remaining unsorted portion.",
            SELECTION_ROWS,
        ),
        SortAlgorithm::Insertion => (
            "Insertion Sort builds the sorted array one element at a time by inserting each element into its correct position.",
            QUADRATIC_ADAPTIVE,
        ),
        SortAlgorithm::Merge => (
            "Merge Sort divides the array into halves, sorts them recursively, and then merges the sorted halves.",
            MERGE_ROWS,
        ),
        SortAlgorithm::Quick => (
            "Quick Sort picks a pivot element and partitions the array around it, then recursively sorts the partitions.",
            QUICK_ROWS,
        ),
        SortAlgorithm::Heap => (
            "Heap Sort builds a max heap from the array, then repeatedly extracts the maximum element to build the sorted array.",
            HEAP_SORT_ROWS,
        ),
    };
    CatalogEntry {
        title: algorithm.name(),
        description,
        columns: CASE_COLUMNS,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_match_columns() {
        let mut topics: Vec<Topic> = SortAlgorithm::ALL.into_iter().map(Topic::Sort).collect();
        topics.extend([
            Topic::Search(SearchAlgorithm::Linear),
            Topic::Search(SearchAlgorithm::Binary),
            Topic::Tree,
            Topic::Heap(HeapKind::Max),
            Topic::Heap(HeapKind::Min),
            Topic::Stack,
            Topic::Queue,
            Topic::HashTable(CollisionStrategy::LinearProbing),
            Topic::HashTable(CollisionStrategy::Chaining),
        ]);
        for topic in topics {
            let entry = entry(topic);
            assert!(!entry.description.is_empty());
            for row in entry.rows {
                assert_eq!(row.len(), entry.columns.len(), "{:?}", topic);
            }
        }
    }

    #[test]
    fn test_quick_sort_worst_case() {
        let entry = entry(Topic::Sort(SortAlgorithm::Quick));
        assert!(entry.rows.iter().any(|row| row[0] == "Worst" && row[1] == "O(n²)"));
    }
}
