//! Tokenization for template engine
//!
//! Provides O(n) tokenization of `{{ ... }}`, `{% ... %}` and `{# ... #}` markers
//! using a state machine. Text between tokens is not materialized here; the parser
//! slices it out of the template using token positions.

/// Which pair of delimiters opened a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    /// `{{ ... }}`
    Expression,
    /// `{% ... %}`
    Statement,
    /// `{# ... #}`
    Comment,
}

impl Delimiter {
    fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Delimiter::Expression),
            b'%' => Some(Delimiter::Statement),
            b'#' => Some(Delimiter::Comment),
            _ => None,
        }
    }

    /// First byte of the closing pair (`}}`, `%}`, `#}`)
    fn close_byte(self) -> u8 {
        match self {
            Delimiter::Expression => b'}',
            Delimiter::Statement => b'%',
            Delimiter::Comment => b'#',
        }
    }

    pub(crate) fn open_marker(self) -> &'static str {
        match self {
            Delimiter::Expression => "{{",
            Delimiter::Statement => "{%",
            Delimiter::Comment => "{#",
        }
    }
}

/// Token classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// {{key}} or {{nested.key}}
    Placeholder { key: String },

    /// {% if ... %}, {% else %}, {% endif %}, {% raw %}, ...
    Tag { keyword: String, args: String },

    /// {# ... #}
    Comment,

    /// Opening marker with no closing marker before end of input
    Unclosed { delimiter: Delimiter },
}

/// A single marker token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of the opening marker
    pub start: usize,
    /// Total length in bytes including both markers
    pub length: usize,
    /// Line number where token starts (for error messages)
    pub line: usize,
    /// `{%-` / `{{-`: strip whitespace before the token
    pub trim_before: bool,
    /// `-%}` / `-}}`: strip whitespace after the token
    pub trim_after: bool,
}

impl Token {
    /// Byte position just past the closing marker
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Statements and comments may occupy a line of their own and vanish with it
    pub fn is_block_level(&self) -> bool {
        matches!(self.kind, TokenKind::Tag { .. } | TokenKind::Comment)
    }
}

/// Tokenization state machine (explicit for testability)
///
/// # State Transitions
///
/// ```text
/// Normal ──{───> SeenLBrace ──{ % #──> InToken ──close──> SeenClose ──}───> [Yield Token] → Normal
///   │               │                     │                   │
///   │ (not {)       │ (other)             │ (other)           │ (other)
///   └──────────────>└────────────────────>└──────────────────>└──────────> InToken
///
/// End of input while InToken/SeenClose → yield Unclosed token
/// ```
///
/// Each byte is visited at most twice (once more after a failed lookahead).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Normal text scanning
    Normal,

    /// Seen first `{`, checking for `{`, `%` or `#`
    SeenLBrace {
        /// Position of the `{` character
        pos: usize,
    },

    /// Inside a token, scanning until the closing pair
    InToken {
        /// Byte position of the opening marker
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        /// Opening delimiter kind
        delimiter: Delimiter,
        /// Line of the opening marker
        line: usize,
    },

    /// Seen the first byte of the closing pair, checking for `}`
    SeenClose {
        /// Byte position of the opening marker
        start: usize,
        /// Byte position where token content starts
        content_start: usize,
        /// Position of the first closing byte
        close_pos: usize,
        /// Opening delimiter kind
        delimiter: Delimiter,
        /// Line of the opening marker
        line: usize,
    },
}

/// Iterator over tokens in a template string
///
/// ```ignore
/// let mut stream = TokenStream::new("Hello {{name}}{% if a %}!{% endif %}");
/// while let Some(token) = stream.next() {
///     println!("Token at {}: {:?}", token.start, token.kind);
/// }
/// ```
pub(crate) struct TokenStream<'a> {
    /// Template text
    text: &'a str,
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number (for error messages)
    line: usize,
    /// Step count for O(n) termination guarantee
    step_count: usize,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            state: ScanState::Normal,
            line: 1,
            step_count: 0,
        }
    }

    /// Classify token content into TokenKind, peeling off whitespace-control dashes
    fn classify_content(content: &str, delimiter: Delimiter) -> (TokenKind, bool, bool) {
        if delimiter == Delimiter::Comment {
            return (TokenKind::Comment, false, false);
        }

        let (content, trim_before) = match content.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (content, false),
        };
        let (content, trim_after) = match content.strip_suffix('-') {
            Some(rest) => (rest, true),
            None => (content, false),
        };
        let trimmed = content.trim();

        let kind = match delimiter {
            Delimiter::Expression => TokenKind::Placeholder {
                key: trimmed.to_string(),
            },
            _ => {
                let (keyword, args) = match trimmed.find(char::is_whitespace) {
                    Some(split) => (&trimmed[..split], trimmed[split..].trim()),
                    None => (trimmed, ""),
                };
                TokenKind::Tag {
                    keyword: keyword.to_string(),
                    args: args.to_string(),
                }
            }
        };

        (kind, trim_before, trim_after)
    }

    /// Jump past the matching `{% endraw %}` without tokenizing the raw body
    ///
    /// Must be called right after the `{% raw %}` token was yielded.
    /// Returns the `endraw` token, or None if the block is never closed.
    pub fn skip_raw(&mut self) -> Option<Token> {
        let mut search = self.pos;

        while let Some(offset) = self.text[search..].find("{%") {
            let start = search + offset;
            let close = self.text[start + 2..].find("%}")?;
            let content = &self.text[start + 2..start + 2 + close];
            let (kind, trim_before, trim_after) =
                Self::classify_content(content, Delimiter::Statement);

            if matches!(&kind, TokenKind::Tag { keyword, .. } if keyword == "endraw") {
                let end = start + 2 + close + 2;
                let line = self.line + count_newlines(&self.text[self.pos..start]);
                self.line = line + count_newlines(&self.text[start..end]);
                self.pos = end;
                self.state = ScanState::Normal;
                return Some(Token {
                    kind,
                    start,
                    length: end - start,
                    line,
                    trim_before,
                    trim_after,
                });
            }

            search = start + 2;
        }

        None
    }

    /// Check if we should continue iteration (guards for step bound and EOF)
    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.text.len()
    }

    /// Yield an Unclosed token if input ended inside a marker
    fn finish(&mut self) -> Option<Token> {
        let pending = match &self.state {
            ScanState::InToken {
                start,
                delimiter,
                line,
                ..
            }
            | ScanState::SeenClose {
                start,
                delimiter,
                line,
                ..
            } => Some((*start, *delimiter, *line)),
            _ => None,
        };
        self.state = ScanState::Normal;

        pending.map(|(start, delimiter, line)| Token {
            kind: TokenKind::Unclosed { delimiter },
            start,
            length: self.text.len() - start,
            line,
            trim_before: false,
            trim_after: false,
        })
    }

    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.text.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return self.finish();
            }

            let byte = self.text.as_bytes()[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state.clone() {
                ScanState::Normal => {
                    if byte == b'{' {
                        self.state = ScanState::SeenLBrace { pos: self.pos };
                    } else if byte == b'\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
                ScanState::SeenLBrace { pos } => match Delimiter::from_open(byte) {
                    Some(delimiter) => {
                        self.state = ScanState::InToken {
                            start: pos,
                            content_start: self.pos + 1,
                            delimiter,
                            line: self.line,
                        };
                        self.pos += 1;
                    }
                    // Lone `{`: reprocess this byte as normal text
                    None => self.state = ScanState::Normal,
                },
                ScanState::InToken {
                    start,
                    content_start,
                    delimiter,
                    line,
                } => {
                    if byte == delimiter.close_byte() {
                        self.state = ScanState::SeenClose {
                            start,
                            content_start,
                            close_pos: self.pos,
                            delimiter,
                            line,
                        };
                    } else if byte == b'\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
                ScanState::SeenClose {
                    start,
                    content_start,
                    close_pos,
                    delimiter,
                    line,
                } => {
                    if byte == b'}' {
                        let content = &self.text[content_start..close_pos];
                        let (kind, trim_before, trim_after) =
                            Self::classify_content(content, delimiter);

                        self.state = ScanState::Normal;
                        self.pos += 1;

                        return Some(Token {
                            kind,
                            start,
                            length: self.pos - start,
                            line,
                            trim_before,
                            trim_after,
                        });
                    }

                    // Closing byte was content; reprocess this byte inside the token
                    self.state = ScanState::InToken {
                        start,
                        content_start,
                        delimiter,
                        line,
                    };
                }
            }
        }
    }
}

/// Count newlines in text
pub(crate) fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
