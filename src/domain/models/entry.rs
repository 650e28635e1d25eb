#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryType {
    Normal,
    Info,
    Error,
}

/// A chat bubble as displayed by the UI. Unlike a history message this also covers
/// notices from Palaver itself, which never reach the completion service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub author: Author,
    pub text: String,
    etype: EntryType,
}

impl Entry {
    pub fn new(author: Author, text: &str) -> Entry {
        return Entry {
            author,
            text: text.to_string().replace('\t', "  "),
            etype: EntryType::Normal,
        };
    }

    pub fn new_with_type(author: Author, etype: EntryType, text: &str) -> Entry {
        return Entry {
            author,
            text: text.to_string().replace('\t', "  "),
            etype,
        };
    }

    pub fn info(text: &str) -> Entry {
        return Entry::new_with_type(Author::Palaver, EntryType::Info, text);
    }

    pub fn error(text: &str) -> Entry {
        return Entry::new_with_type(Author::Palaver, EntryType::Error, text);
    }


    pub fn entry_type(&self) -> EntryType {
        return self.etype;
    }

    pub fn replace(&mut self, text: &str) {
        self.text = text.replace('\t', "  ");
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                let word_len = word.chars().count();
                if word_len + char_count + 1 > line_max_width && !current_lines.is_empty() {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word_len + 1;
                } else {
                    current_lines.push(word);
                    char_count += word_len + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
