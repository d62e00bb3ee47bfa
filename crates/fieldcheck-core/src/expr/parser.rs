//! Rule expression parser
//!
//! Recursive descent over comma-separated tokens. `dive` hands the rest of the
//! expression to a nested rule list; `keys ... endkeys` right after `dive`
//! brackets the rules for mapping keys.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use super::ast::{
    Dive, FieldRules, RuleSpec, Slot, DIRECTIVES, DIVE, END_KEYS, KEYS, OMIT_EMPTY, SKIP,
};
use super::error::ParseError;

/// Escaped comma inside a parameter
const ESCAPED_COMMA: &str = "0x2C";
/// Escaped pipe inside a parameter
const ESCAPED_PIPE: &str = "0x7C";

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    offset: usize,
}

/// Rule expression parser
pub struct Parser<'a> {
    /// Input string being parsed
    input: &'a str,
    /// Comma-separated tokens with their byte offsets
    tokens: Vec<Token<'a>>,
    /// Index of the next token
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for raw in input.split(',') {
            let leading = raw.len() - raw.trim_start().len();
            tokens.push(Token {
                text: raw.trim(),
                offset: offset + leading,
            });
            offset += raw.len() + 1;
        }

        Self {
            input,
            tokens,
            position: 0,
        }
    }

    /// Parse the expression into field rules
    pub fn parse(mut self) -> Result<FieldRules, ParseError> {
        if self.input.trim().is_empty() {
            return Ok(FieldRules::default());
        }

        let (rules, _) = self.parse_rules(false)?;
        Ok(rules)
    }

    /// Parse a rule list; the flag reports whether it was closed by `endkeys`
    fn parse_rules(&mut self, in_keys: bool) -> Result<(FieldRules, bool), ParseError> {
        let mut rules = FieldRules::default();

        while let Some(token) = self.advance() {
            match token.text {
                DIVE => {
                    let (dive, closed) = self.parse_dive(in_keys)?;
                    rules.dive = Some(Box::new(dive));
                    return Ok((rules, closed));
                }
                KEYS => return Err(self.error(token, "'keys' must directly follow 'dive'")),
                END_KEYS if in_keys => return Ok((rules, true)),
                END_KEYS => return Err(self.error(token, "'endkeys' without a matching 'keys'")),
                OMIT_EMPTY => rules.omit_empty = true,
                SKIP => {
                    if self.tokens.len() > 1 {
                        return Err(self.error(token, "'-' cannot be combined with other rules"));
                    }
                    rules.skip = true;
                }
                _ => rules.slots.push(self.parse_slot(token)?),
            }
        }

        Ok((rules, false))
    }

    /// Parse what follows `dive`: optional key rules, then element rules
    fn parse_dive(&mut self, in_keys: bool) -> Result<(Dive, bool), ParseError> {
        let mut dive = Dive::default();

        if let Some(token) = self.peek().filter(|t| t.text == KEYS) {
            self.advance();
            let (keys, closed) = self.parse_rules(true)?;
            if !closed {
                return Err(self.error(token, "'keys' without a matching 'endkeys'"));
            }
            dive.keys = Some(keys);
        }

        let (elements, closed) = self.parse_rules(in_keys)?;
        dive.elements = elements;
        Ok((dive, closed))
    }

    /// Parse a single rule or an OR-group
    fn parse_slot(&self, token: Token<'a>) -> Result<Slot, ParseError> {
        if token.text.is_empty() {
            return Err(self.error(token, "empty rule"));
        }

        if !token.text.contains('|') {
            return self.parse_spec(token.text, token.offset).map(Slot::Single);
        }

        let mut specs = Vec::new();
        let mut offset = token.offset;
        for alternative in token.text.split('|') {
            let name = alternative.split('=').next().unwrap_or("");
            if DIRECTIVES.contains(&name) {
                return Err(ParseError::new(
                    self.input,
                    offset,
                    format!("directive '{}' cannot appear in an OR group", name),
                ));
            }
            specs.push(self.parse_spec(alternative, offset)?);
            offset += alternative.len() + 1;
        }
        Ok(Slot::AnyOf(specs))
    }

    /// Parse `name` or `name=param`
    fn parse_spec(&self, text: &str, offset: usize) -> Result<RuleSpec, ParseError> {
        if text.is_empty() {
            return Err(ParseError::new(self.input, offset, "empty alternative in OR group"));
        }

        let (name, param) = match text.split_once('=') {
            Some((name, param)) => (name, Some(unescape(param))),
            None => (text, None),
        };

        if name.is_empty() {
            return Err(ParseError::new(self.input, offset, "missing rule name before '='"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ParseError::new(
                self.input,
                offset,
                format!("rule name '{}' contains whitespace", name),
            ));
        }

        Ok(RuleSpec {
            name: name.to_string(),
            param,
        })
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn error(&self, token: Token<'a>, message: &str) -> ParseError {
        ParseError::new(self.input, token.offset, message)
    }
}

fn unescape(param: &str) -> String {
    param.replace(ESCAPED_COMMA, ",").replace(ESCAPED_PIPE, "|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> FieldRules {
        Parser::new(input).parse().unwrap()
    }

    fn parse_err(input: &str) -> ParseError {
        Parser::new(input).parse().unwrap_err()
    }

    #[test]
    fn test_parse_simple_list() {
        let rules = parse("required,number,min=5,max=10");
        assert_eq!(
            rules.slots,
            vec![
                Slot::Single(RuleSpec::new("required")),
                Slot::Single(RuleSpec::new("number")),
                Slot::Single(RuleSpec::with_param("min", "5")),
                Slot::Single(RuleSpec::with_param("max", "10")),
            ]
        );
        assert!(rules.dive.is_none());
    }

    #[test]
    fn test_parse_empty_expression() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_parse_or_group() {
        let rules = parse("required,email|numeric");
        assert_eq!(
            rules.slots[1],
            Slot::AnyOf(vec![RuleSpec::new("email"), RuleSpec::new("numeric")])
        );
    }

    #[test]
    fn test_parse_or_group_with_params() {
        let rules = parse("field_equals_ignore_case=email|field_equals_ignore_case=phone");
        assert_eq!(
            rules.slots[0],
            Slot::AnyOf(vec![
                RuleSpec::with_param("field_equals_ignore_case", "email"),
                RuleSpec::with_param("field_equals_ignore_case", "phone"),
            ])
        );
    }

    #[test]
    fn test_parse_sequence_dive() {
        let rules = parse("required,dive,required,min=3");
        assert_eq!(rules.slots, vec![Slot::Single(RuleSpec::new("required"))]);

        let dive = rules.dive.unwrap();
        assert!(dive.keys.is_none());
        assert_eq!(
            dive.elements.slots,
            vec![
                Slot::Single(RuleSpec::new("required")),
                Slot::Single(RuleSpec::with_param("min", "3")),
            ]
        );
    }

    #[test]
    fn test_parse_mapping_dive_with_keys() {
        let rules = parse("dive,keys,required,endkeys,required,gt=1000");
        let dive = rules.dive.unwrap();
        let keys = dive.keys.unwrap();
        assert_eq!(keys.slots, vec![Slot::Single(RuleSpec::new("required"))]);
        assert_eq!(dive.elements.slots.len(), 2);
    }

    #[test]
    fn test_parse_keys_only_dive() {
        let rules = parse("required,min=1,dive,keys,required,min=2,endkeys");
        let dive = rules.dive.unwrap();
        assert_eq!(dive.keys.unwrap().slots.len(), 2);
        assert!(dive.elements.is_empty());
    }

    #[test]
    fn test_parse_nested_dive() {
        let rules = parse("dive,dive,required");
        let inner = rules.dive.unwrap().elements.dive.unwrap();
        assert_eq!(inner.elements.slots, vec![Slot::Single(RuleSpec::new("required"))]);
    }

    #[test]
    fn test_parse_directives() {
        assert!(parse("omitempty,min=3").omit_empty);
        assert!(parse("-").skip);
    }

    #[test]
    fn test_parse_escaped_parameters() {
        let rules = parse("oneof=a0x2Cb c0x7Cd");
        assert_eq!(rules.slots[0], Slot::Single(RuleSpec::with_param("oneof", "a,b c|d")));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let rules = parse("required, min=5");
        assert_eq!(rules.slots[1], Slot::Single(RuleSpec::with_param("min", "5")));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_err("required,,min=1").position, 9);
        assert!(parse_err("keys,required,endkeys").message.contains("directly follow"));
        assert!(parse_err("dive,keys,required").message.contains("endkeys"));
        assert!(parse_err("required,endkeys").message.contains("matching 'keys'"));
        assert!(parse_err("email|").message.contains("empty alternative"));
        assert!(parse_err("=5").message.contains("missing rule name"));
        assert!(parse_err("required|dive").message.contains("OR group"));
        assert!(parse_err("-,required").message.contains("cannot be combined"));
        assert!(parse_err("mi n=3").message.contains("whitespace"));
    }
}
