use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Entry;

impl BubbleList {
    pub fn rendered_text(&self) -> String {
        let mut indexes: Vec<&usize> = self.cache.keys().collect();
        indexes.sort();

        return indexes
            .into_iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|cache_entry| return cache_entry.lines.iter())
            .map(|line| return line.to_string())
            .collect::<Vec<String>>()
            .join("\n");
    }
}

fn entries() -> Vec<Entry> {
    return vec![
        Entry::new(Author::Palaver, "Hi there!"),
        Entry::new(Author::User, "Hello"),
        Entry::new(Author::Model("gpt-4o".to_string()), "one\ntwo\nthree"),
    ];
}

#[test]
fn it_has_no_cached_lines() {
    let bubble_list = BubbleList::default();

    assert_eq!(bubble_list.cache.len(), 0);
    assert!(bubble_list.is_empty());
}

#[test]
fn it_caches_lines() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_entries(&entries(), 50);

    assert_eq!(bubble_list.cache.len(), 3);
}

#[test]
fn it_returns_correct_length() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_entries(&entries(), 50);

    assert_eq!(bubble_list.len(), 3 + 3 + 5);
}

#[test]
fn it_rerenders_the_growing_last_entry() {
    let mut entries = entries();
    let mut bubble_list = BubbleList::default();
    bubble_list.set_entries(&entries, 50);

    entries[2].replace("one\ntwo\nthree\nfour");
    bubble_list.set_entries(&entries, 50);

    assert_eq!(bubble_list.len(), 3 + 3 + 6);
}

#[test]
fn it_drops_stale_entries() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_entries(&entries(), 50);
    bubble_list.set_entries(&[Entry::info("History cleared.")], 50);

    assert_eq!(bubble_list.cache.len(), 1);
    assert_eq!(bubble_list.len(), 3);
}

#[test]
fn it_resets_on_width_change() {
    let mut bubble_list = BubbleList::default();
    bubble_list.set_entries(&entries(), 50);
    bubble_list.set_entries(&entries(), 80);

    assert_eq!(bubble_list.line_width, 80);
    assert_eq!(bubble_list.cache.len(), 3);
}
