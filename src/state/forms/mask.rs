//! Input masks for formatted fields (phone, CPF, CEP)

/// One position of a mask template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskToken {
    /// Accepts a single ASCII digit (template char `9`)
    Digit,
    /// Emitted verbatim between placeholders
    Literal(char),
}

impl MaskToken {
    fn accepts(&self, c: char) -> bool {
        match self {
            MaskToken::Digit => c.is_ascii_digit(),
            MaskToken::Literal(_) => false,
        }
    }
}

/// Ordered mask template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSpec {
    tokens: Vec<MaskToken>,
}

impl MaskSpec {
    /// Parse a template where `9` is a digit placeholder and anything else is
    /// a literal, e.g. `(99) 99999-9999`
    pub fn parse(template: &str) -> Self {
        let tokens = template
            .chars()
            .map(|c| match c {
                '9' => MaskToken::Digit,
                other => MaskToken::Literal(other),
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[MaskToken] {
        &self.tokens
    }

    /// Number of input characters the template can hold
    pub fn capacity(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, MaskToken::Digit))
            .count()
    }

    fn accepts_any(&self, c: char) -> bool {
        self.tokens.iter().any(|t| t.accepts(c))
    }
}

/// Lay `raw` into the template.
///
/// Characters no placeholder accepts are discarded, so `raw` may already be
/// masked. Literals are only written while input remains, which keeps
/// partial input well-formed: `"119"` with `(99) 99999-9999` gives `"(11) 9"`.
pub fn apply_mask(raw: &str, spec: &MaskSpec) -> String {
    let mut input = raw.chars().filter(|c| spec.accepts_any(*c)).peekable();
    let mut out = String::new();

    for token in spec.tokens() {
        let Some(&next) = input.peek() else {
            break;
        };
        match token {
            MaskToken::Literal(lit) => out.push(*lit),
            MaskToken::Digit => {
                if token.accepts(next) {
                    out.push(next);
                }
                input.next();
            }
        }
    }

    out
}

/// Canonical value: only the characters that fill placeholders
pub fn unmask(display: &str, spec: &MaskSpec) -> String {
    display.chars().filter(|c| spec.accepts_any(*c)).collect()
}
