use std::collections::HashMap;

/// Indentation unit of a text file, reused verbatim when the file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indent(String);

impl Default for Indent {
    fn default() -> Self {
        Indent::spaces(2)
    }
}

impl Indent {
    pub fn spaces(width: usize) -> Self {
        Indent(" ".repeat(width))
    }

    pub fn tab() -> Self {
        Indent("\t".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_tab(&self) -> bool {
        self.0.starts_with('\t')
    }

    /// Width in columns. A tab counts as one.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Detect the indentation unit used by `text`.
    ///
    /// Tallies the step between consecutive indented lines and picks the most
    /// frequent one; ties go to the step seen most often as a fresh increase.
    /// Returns `None` when no line is indented.
    pub fn detect(text: &str) -> Option<Indent> {
        #[derive(Default)]
        struct Tally {
            occurrences: usize,
            increases: usize,
        }

        let mut tallies: HashMap<(char, usize), Tally> = HashMap::new();
        let mut previous: Option<(char, usize)> = None;
        let mut previous_key: Option<(char, usize)> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let current = leading_indent(line);
            let (kind, width) = current;

            if width == 0 {
                previous = None;
                previous_key = None;
                continue;
            }

            let step = match previous {
                Some((prev_kind, prev_width)) if prev_kind == kind => {
                    width.abs_diff(prev_width)
                }
                _ => width,
            };
            let increased = previous.map_or(true, |(_, prev_width)| width > prev_width);
            previous = Some(current);

            if step == 0 {
                // same level: credit the step that got us here
                if let Some(key) = previous_key {
                    if let Some(tally) = tallies.get_mut(&key) {
                        tally.occurrences += 1;
                    }
                }
                continue;
            }

            let key = (kind, step);
            let tally = tallies.entry(key).or_default();
            tally.occurrences += 1;
            if increased {
                tally.increases += 1;
            }
            previous_key = Some(key);
        }

        tallies
            .into_iter()
            .max_by(|(ka, a), (kb, b)| {
                a.occurrences
                    .cmp(&b.occurrences)
                    .then(a.increases.cmp(&b.increases))
                    // prefer the narrower step on a full tie
                    .then(kb.1.cmp(&ka.1))
            })
            .map(|((kind, step), _)| match kind {
                '\t' => Indent("\t".repeat(step)),
                _ => Indent(" ".repeat(step)),
            })
    }
}

fn leading_indent(line: &str) -> (char, usize) {
    let first = line.chars().next().unwrap_or(' ');
    let kind = if first == '\t' { '\t' } else { ' ' };
    let width = line.chars().take_while(|c| *c == kind).count();
    (kind, width)
}
