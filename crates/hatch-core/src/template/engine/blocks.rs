//! Block structure: turns the token stream into a tree of conditional blocks
//!
//! Single left-to-right pass over the tokens with a stack of open `if` blocks.
//! `{% if %}` pushes a block buffering into its true branch, `{% else %}` switches
//! the top block to its false branch, `{% elif %}` opens a chained block inside the
//! false branch, and `{% endif %}` pops (a whole `elif` chain at once) and attaches
//! the finished conditional to its parent.

use super::predicate::Predicate;
use super::tokenize::{Token, TokenKind, TokenStream};
use crate::template::ast::{Conditional, Node};
use crate::template::error::TemplateError;

/// A conditional whose `endif` has not been seen yet
struct OpenBlock {
    predicate: Predicate,
    line: usize,
    then_branch: Vec<Node>,
    else_branch: Option<Vec<Node>>,
    /// Opened by `elif`; closed by the same `endif` as its parent
    chained: bool,
}

impl OpenBlock {
    fn new(predicate: Predicate, line: usize, chained: bool) -> Self {
        Self {
            predicate,
            line,
            then_branch: Vec::new(),
            else_branch: None,
            chained,
        }
    }

    fn buffer(&mut self) -> &mut Vec<Node> {
        match &mut self.else_branch {
            Some(branch) => branch,
            None => &mut self.then_branch,
        }
    }

    fn close(self) -> Node {
        Node::Conditional(Conditional {
            predicate: self.predicate,
            line: self.line,
            then_branch: self.then_branch,
            else_branch: self.else_branch,
        })
    }
}

/// Parse template text into a node tree
///
/// Fails with `MalformedTemplate` on unbalanced or unknown markers; never consults
/// a context.
pub(crate) fn parse_blocks(template: &str) -> Result<Vec<Node>, TemplateError> {
    BlockParser {
        template,
        tokens: TokenStream::new(template),
        cursor: 0,
        trim_next: false,
        root: Vec::new(),
        stack: Vec::new(),
    }
    .run()
}

struct BlockParser<'a> {
    template: &'a str,
    tokens: TokenStream<'a>,
    /// Start of text not yet emitted
    cursor: usize,
    /// Previous token ended with `-%}` / `-}}`
    trim_next: bool,
    root: Vec<Node>,
    stack: Vec<OpenBlock>,
}

impl<'a> BlockParser<'a> {
    fn run(mut self) -> Result<Vec<Node>, TemplateError> {
        while let Some(token) = self.tokens.next() {
            self.push_text_before(&token);
            self.handle_token(&token)?;
        }

        let tail = &self.template[self.cursor..];
        let tail = if self.trim_next { tail.trim_start() } else { tail };
        self.push_literal(tail);

        if let Some(open) = self.stack.iter().rev().find(|block| !block.chained) {
            return Err(TemplateError::malformed(
                format!("Unclosed {{% if %}} opened at line {}", open.line),
                open.line,
            ));
        }

        Ok(self.root)
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(block) => block.buffer(),
            None => &mut self.root,
        }
    }

    fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let buffer = self.current();
        if let Some(Node::Literal(previous)) = buffer.last_mut() {
            previous.push_str(text);
        } else {
            buffer.push(Node::Literal(text.to_string()));
        }
    }

    /// Emit the text between the cursor and `token`, applying whitespace control
    fn push_text_before(&mut self, token: &Token) {
        let text = self.whitespace_controlled(self.cursor, token);
        self.push_literal(text);
    }

    fn whitespace_controlled(&self, from: usize, token: &Token) -> &'a str {
        let template = self.template;
        let mut text = &template[from..token.start];
        if self.trim_next {
            text = text.trim_start();
        }
        if token.trim_before {
            text = text.trim_end();
        } else if token.is_block_level() && standalone_end(template, token).is_some() {
            text = text.trim_end_matches([' ', '\t']);
        }
        text
    }

    /// Move the cursor past `token`, swallowing its line if it stands alone
    fn advance_past(&mut self, token: &Token) {
        self.cursor = if token.is_block_level() {
            standalone_end(self.template, token).unwrap_or_else(|| token.end())
        } else {
            token.end()
        };
        self.trim_next = token.trim_after;
    }

    fn handle_token(&mut self, token: &Token) -> Result<(), TemplateError> {
        match &token.kind {
            TokenKind::Comment => {}
            TokenKind::Placeholder { key } => {
                if key.is_empty() || !key.chars().all(is_key_char) {
                    return Err(TemplateError::malformed(
                        format!("Invalid placeholder '{{{{ {} }}}}'", key),
                        token.line,
                    ));
                }
                let node = Node::Variable {
                    key: key.clone(),
                    line: token.line,
                };
                self.current().push(node);
            }
            TokenKind::Unclosed { delimiter } => {
                return Err(TemplateError::malformed(
                    format!("Unclosed {} marker", delimiter.open_marker()),
                    token.line,
                ));
            }
            TokenKind::Tag { keyword, args } => {
                return self.handle_tag(keyword, args, token);
            }
        }

        self.advance_past(token);
        Ok(())
    }

    fn handle_tag(&mut self, keyword: &str, args: &str, token: &Token) -> Result<(), TemplateError> {
        let line = token.line;
        let no_args = |name: &str| {
            if args.is_empty() {
                Ok(())
            } else {
                Err(TemplateError::malformed(
                    format!("Unexpected arguments after {{% {} %}}: '{}'", name, args),
                    line,
                ))
            }
        };

        match keyword {
            "if" => {
                let predicate = Predicate::parse(args, line)?;
                self.stack.push(OpenBlock::new(predicate, line, false));
            }
            "elif" => {
                let top = self.stack.last_mut().ok_or_else(|| {
                    TemplateError::malformed("{% elif %} without matching {% if %}", line)
                })?;
                if top.else_branch.is_some() {
                    return Err(TemplateError::malformed("{% elif %} after {% else %}", line));
                }
                let predicate = Predicate::parse(args, line)?;
                top.else_branch = Some(Vec::new());
                self.stack.push(OpenBlock::new(predicate, line, true));
            }
            "else" => {
                no_args("else")?;
                let top = self.stack.last_mut().ok_or_else(|| {
                    TemplateError::malformed("{% else %} without matching {% if %}", line)
                })?;
                if top.else_branch.is_some() {
                    return Err(TemplateError::malformed(
                        format!("Duplicate {{% else %}} in block opened at line {}", top.line),
                        line,
                    ));
                }
                top.else_branch = Some(Vec::new());
            }
            "endif" => {
                no_args("endif")?;
                loop {
                    let block = self.stack.pop().ok_or_else(|| {
                        TemplateError::malformed("{% endif %} without matching {% if %}", line)
                    })?;
                    let chained = block.chained;
                    let node = block.close();
                    self.current().push(node);
                    if !chained {
                        break;
                    }
                }
            }
            "raw" => {
                no_args("raw")?;
                return self.handle_raw(token);
            }
            "endraw" => {
                return Err(TemplateError::malformed(
                    "{% endraw %} without matching {% raw %}",
                    line,
                ));
            }
            other => {
                return Err(TemplateError::malformed(
                    format!("Unknown tag '{{% {} %}}'", other),
                    line,
                ));
            }
        }

        self.advance_past(token);
        Ok(())
    }

    /// Emit everything up to `{% endraw %}` verbatim
    fn handle_raw(&mut self, token: &Token) -> Result<(), TemplateError> {
        self.advance_past(token);

        let end = self
            .tokens
            .skip_raw()
            .ok_or_else(|| TemplateError::malformed("Unclosed {% raw %} block", token.line))?;

        let body = self.whitespace_controlled(self.cursor, &end);
        self.push_literal(body);
        self.advance_past(&end);
        Ok(())
    }
}

/// Placeholder keys are dotted paths of `[A-Za-z0-9_-]` segments
fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// If `token` is alone on its line (only spaces/tabs around it), return the byte
/// position just past the line's newline (or end of input)
fn standalone_end(template: &str, token: &Token) -> Option<usize> {
    let line_start = template[..token.start].rfind('\n').map_or(0, |i| i + 1);
    if !template[line_start..token.start]
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
    {
        return None;
    }

    let rest = &template[token.end()..];
    let after_ws = rest.trim_start_matches([' ', '\t']);
    let ws = rest.len() - after_ws.len();

    if after_ws.is_empty() {
        Some(token.end() + ws)
    } else if after_ws.starts_with("\r\n") {
        Some(token.end() + ws + 2)
    } else if after_ws.starts_with('\n') {
        Some(token.end() + ws + 1)
    } else {
        None
    }
}
