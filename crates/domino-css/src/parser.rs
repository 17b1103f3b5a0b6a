//! Selector Parser
//!
//! Hand-written recursive descent over the selector grammar used by
//! `querySelectorAll`: selector lists, combinators, compound selectors.

use crate::SelectorError;
use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList,
};

/// Selector parser state
pub(crate) struct SelectorParser {
    chars: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    /// Parse a complete selector list
    pub(crate) fn parse(input: &str) -> Result<SelectorList, SelectorError> {
        if input.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Self {
            chars: input.chars().collect(),
            pos: 0,
        };
        let list = parser.parse_list(false)?;
        tracing::trace!("Parsed selector {:?} into {} alternatives", input, list.0.len());
        Ok(list)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::UnexpectedChar { found, position: self.pos },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), SelectorError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Skip whitespace, reporting whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// `nested` lists end at `)` (inside `:not(...)`), top-level ones at EOF
    fn parse_list(&mut self, nested: bool) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') if nested => break,
                None if !nested => break,
                _ => return Err(self.unexpected()),
            }
        }
        Ok(SelectorList(selectors))
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(c) if had_ws && starts_compound(c) => Combinator::Descendant,
                _ => break,
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut parts = Vec::new();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                parts.push(SelectorComponent::Universal);
            }
            Some(c) if is_ident_start(c) => {
                parts.push(SelectorComponent::Type(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Id(self.ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    parts.push(SelectorComponent::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(self.unexpected());
        }
        Ok(CompoundSelector(parts))
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector::presence(name));
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.pos += 1;
                self.expect('=')?;
                c
            }
            _ => return Err(self.unexpected()),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => self.string(q)?,
            _ => self.ident()?,
        };
        self.skip_ws();

        let mut case_insensitive = false;
        match self.peek() {
            Some('i' | 'I') => {
                self.pos += 1;
                case_insensitive = true;
            }
            Some('s' | 'S') => self.pos += 1,
            _ => {}
        }
        self.skip_ws();
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };

        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            self.pos += 1;
            let name = self.ident()?;
            return Err(SelectorError::PseudoElement(name));
        }

        let name = self.ident()?.to_ascii_lowercase();
        if self.peek() != Some('(') {
            return Ok(match name.as_str() {
                "checked" => PseudoClass::Checked,
                "disabled" => PseudoClass::Disabled,
                "enabled" => PseudoClass::Enabled,
                "root" => PseudoClass::Root,
                "empty" => PseudoClass::Empty,
                "first-child" => PseudoClass::FirstChild,
                "last-child" => PseudoClass::LastChild,
                "only-child" => PseudoClass::OnlyChild,
                "first-of-type" => PseudoClass::FirstOfType,
                "last-of-type" => PseudoClass::LastOfType,
                "only-of-type" => PseudoClass::OnlyOfType,
                _ => return Err(SelectorError::UnsupportedPseudo(name)),
            });
        }

        self.pos += 1;
        let pseudo = match name.as_str() {
            "not" => PseudoClass::Not(self.parse_list(true)?),
            "nth-child" => PseudoClass::NthChild(self.nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.nth()?),
            _ => return Err(SelectorError::UnsupportedPseudo(name)),
        };
        self.expect(')')?;
        Ok(pseudo)
    }

    fn nth(&mut self) -> Result<NthExpression, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        NthExpression::parse(&raw).ok_or(SelectorError::InvalidNth(raw))
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
                out.push(escaped);
                self.pos += 1;
            } else if is_ident_char(c) {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        if out.is_empty() {
            return Err(self.unexpected());
        }
        Ok(out)
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or(SelectorError::UnexpectedEnd)?;
                    out.push(escaped);
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn starts_compound(c: char) -> bool {
    is_ident_start(c) || matches!(c, '*' | '#' | '.' | '[' | ':')
}
