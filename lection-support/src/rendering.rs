//! Human-friendly rendering for context errors and reports.
//!
//! Type names coming from [`std::any::type_name`] are long and noisy
//! (`alloc::sync::Arc<dyn lection_domain::printer::PrettyPrinter>`), so
//! everything a person reads goes through these helpers first.

/// Joins a chain of bean names with arrows.
///
/// # Examples
/// ```
/// use lection_support::rendering::render_chain;
///
/// let chain = ["AuthorService", "Repository", "AuthorService"];
/// assert_eq!(render_chain(&chain), "AuthorService → Repository → AuthorService");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    let mut out = String::new();
    for (i, link) in chain.iter().enumerate() {
        if i > 0 {
            out.push_str(" → ");
        }
        out.push_str(link.as_ref());
    }
    out
}

/// Drops module paths from every segment of a type name.
///
/// ```
/// use lection_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("lection_domain::author::Author"), "Author");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn lection_domain::printer::PrettyPrinter>"),
///     "Arc<dyn PrettyPrinter>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut segment = String::new();
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '&' | '[' | ']' | ';' => {
                out.push_str(&segment);
                out.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    out.push_str(&segment);
    out
}

/// Picks up to `limit` names from `available` that look like `requested`.
///
/// Substring matches on the full name rank first, then matches on the
/// shortened name, then names sharing a prefix of three or more
/// characters with the requested one.
pub fn suggest_similar(requested: &str, available: &[&str], limit: usize) -> Vec<String> {
    let wanted = requested.to_lowercase();
    let wanted_short = shorten_type_name(requested).to_lowercase();

    let mut ranked: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|&candidate| {
            let full = candidate.to_lowercase();
            if full == wanted {
                return None;
            }
            if full.contains(&wanted) || wanted.contains(&full) {
                return Some((100, candidate));
            }

            let short = shorten_type_name(candidate).to_lowercase();
            if short.contains(&wanted_short) || wanted_short.contains(&short) {
                return Some((80, candidate));
            }

            let prefix = short
                .chars()
                .zip(wanted_short.chars())
                .take_while(|(a, b)| a == b)
                .count();
            (prefix >= 3).then_some((prefix * 10, candidate))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

/// One line of a bean report.
#[derive(Debug, Clone)]
pub struct BeanLine {
    /// Lifecycle label, e.g. `Singleton`.
    pub lifecycle: String,
    /// Bean type name (already shortened or not, printed as-is).
    pub bean: String,
    /// Beans this one declares as required.
    pub requires: Vec<String>,
}

/// Renders an aligned listing of beans.
///
/// ```text
/// [Singleton] Arc<dyn Repository<Author, i64>>
/// [Singleton] Arc<dyn AuthorService>  requires: Arc<dyn Repository<Author, i64>>
/// ```
pub fn render_bean_report(lines: &[BeanLine]) -> String {
    let width = lines.iter().map(|l| l.lifecycle.len()).max().unwrap_or(0);
    let mut out = String::new();

    for line in lines {
        out.push_str(&format!("[{:<width$}] {}", line.lifecycle, line.bean));
        if !line.requires.is_empty() {
            out.push_str("  requires: ");
            out.push_str(&line.requires.join(", "));
        }
        out.push('\n');
    }

    out
}
