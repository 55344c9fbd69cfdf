//! Recipient list parsing.
//!
//! Send operations address recipients the way the remote system does:
//! one string per namespace, ids joined by `|`.
//!
//! ```text
//! " 10232 | 8891 |"  →  ["10232", "8891"]
//! ""                 →  []
//! "|"                →  []
//! ```
//!
//! Tokens are trimmed and empty segments dropped, so a stray delimiter
//! never yields a phantom empty recipient.

/// Delimiter between recipient ids in a send request.
pub const RECIPIENT_DELIMITER: char = '|';

/// An ordered sequence of recipient tokens parsed from one delimited string.
///
/// Order follows the input so the first offending token can be reported.
///
/// # Example
///
/// ```
/// use youdu_auth::RecipientList;
///
/// let list = RecipientList::parse(" 10232 | 8891 ");
/// assert_eq!(list.tokens(), ["10232", "8891"]);
/// assert!(RecipientList::parse("|").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> RecipientList<'a> {
    /// Splits a delimited recipient string into tokens.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let tokens = raw
            .split(RECIPIENT_DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();
        Self { tokens }
    }

    /// Returns the tokens in input order.
    #[must_use]
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Returns `true` if no recipient is named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the first token not contained in `allowed`.
    ///
    /// An empty `allowed` set is unrestricted and never rejects.
    #[must_use]
    pub fn first_outside(&self, allowed: &[String]) -> Option<&'a str> {
        if allowed.is_empty() {
            return None;
        }
        self.tokens
            .iter()
            .copied()
            .find(|token| !allowed.iter().any(|a| a == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_id() {
        assert_eq!(RecipientList::parse("123").tokens(), ["123"]);
    }

    #[test]
    fn multiple_ids() {
        assert_eq!(
            RecipientList::parse("123|456|789").tokens(),
            ["123", "456", "789"]
        );
    }

    #[test]
    fn ids_with_spaces() {
        assert_eq!(
            RecipientList::parse("123 | 456 | 789").tokens(),
            ["123", "456", "789"]
        );
        assert_eq!(
            RecipientList::parse(" 10232 | 8891 ").tokens(),
            ["10232", "8891"]
        );
    }

    #[test]
    fn empty_and_delimiter_only_yield_nothing() {
        assert!(RecipientList::parse("").tokens().is_empty());
        assert!(RecipientList::parse("|").tokens().is_empty());
        assert!(RecipientList::parse(" | | ").is_empty());
    }

    #[test]
    fn leading_and_trailing_delimiters_collapse() {
        assert_eq!(RecipientList::parse("|10232|").tokens(), ["10232"]);
        assert_eq!(RecipientList::parse("a||b").tokens(), ["a", "b"]);
    }

    #[test]
    fn first_outside_reports_first_offender_in_order() {
        let list = RecipientList::parse("10232|99999|88888");
        assert_eq!(
            list.first_outside(&allowed(&["10232", "8891"])),
            Some("99999")
        );
    }

    #[test]
    fn first_outside_none_when_all_members() {
        let list = RecipientList::parse("10232|8891");
        assert_eq!(list.first_outside(&allowed(&["10232", "8891"])), None);
    }

    #[test]
    fn unrestricted_set_never_rejects() {
        let list = RecipientList::parse("anyone|else");
        assert_eq!(list.first_outside(&[]), None);
    }

    #[test]
    fn empty_list_passes_restricted_set() {
        let list = RecipientList::parse("");
        assert_eq!(list.first_outside(&allowed(&["1"])), None);
    }
}
