use std::str::FromStr;

use crate::error::{MatrixError, MatrixResult};
use crate::expr::tokenizer::{tokenize, Spanned, Token};
use crate::expr::{ConstructionStyle, Expression};
use crate::{Coord, CoordinateModel, Element, ElementKind};

/// Read one expression; trailing tokens are an error.
pub(crate) fn read_expression(input: &str) -> MatrixResult<Expression> {
    let mut reader = Reader {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expression = reader.expression()?;
    if let Some((token, offset)) = reader.tokens.get(reader.pos) {
        return Err(MatrixError::Parse(format!(
            "Unexpected {} at offset {offset} after end of expression",
            token.describe()
        )));
    }
    Ok(expression)
}

struct Reader {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Ident(ident)) => Some(ident.as_str()),
            _ => None,
        }
    }

    fn next(&mut self) -> MatrixResult<&Spanned> {
        let spanned = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| MatrixError::Parse("Unexpected end of expression".to_string()))?;
        self.pos += 1;
        Ok(spanned)
    }

    fn expect(&mut self, expected: Token) -> MatrixResult<()> {
        let (token, offset) = self.next()?;
        if *token == expected {
            Ok(())
        } else {
            Err(MatrixError::Parse(format!(
                "Expected {} at offset {offset}, found {}",
                expected.describe(),
                token.describe()
            )))
        }
    }

    fn ident(&mut self) -> MatrixResult<String> {
        match self.next()? {
            (Token::Ident(ident), _) => Ok(ident.clone()),
            (token, offset) => Err(MatrixError::Parse(format!(
                "Expected identifier at offset {offset}, found {}",
                token.describe()
            ))),
        }
    }

    fn number(&mut self) -> MatrixResult<f64> {
        match self.next()? {
            (Token::Number(number), _) => Ok(*number),
            (token, offset) => Err(MatrixError::Parse(format!(
                "Expected number at offset {offset}, found {}",
                token.describe()
            ))),
        }
    }

    fn label(&mut self, expected: &str) -> MatrixResult<()> {
        let offset = self.tokens.get(self.pos).map(|(_, offset)| *offset);
        let label = self.ident()?;
        if label != expected {
            return Err(MatrixError::Parse(format!(
                "Expected label '{expected}' at offset {}, found '{label}'",
                offset.unwrap_or_default()
            )));
        }
        self.expect(Token::Colon)
    }

    /// `Kind<Model>(...)`
    fn expression(&mut self) -> MatrixResult<Expression> {
        let kind = ElementKind::from_str(&self.ident()?)?;
        self.expect(Token::LeftAngle)?;
        let model = CoordinateModel::from_str(&self.ident()?)?;
        self.expect(Token::RightAngle)?;
        self.expect(Token::LeftParen)?;

        let (style, element) = match kind {
            ElementKind::Point => self.point_body(model)?,
            ElementKind::LineString => self.line_string_body(model)?,
            ElementKind::Polygon => self.polygon_body(model)?,
        };

        self.expect(Token::RightParen)?;
        Ok(Expression::new(style, model, element))
    }

    fn point_body(&mut self, model: CoordinateModel) -> MatrixResult<(ConstructionStyle, Element)> {
        if self.peek_ident() == Some("coordinate") {
            self.label("coordinate")?;
            let coord = self.coord(model)?;
            Ok((ConstructionStyle::Named, Element::Point(coord)))
        } else {
            let coord = self.ordinates(model)?;
            Ok((ConstructionStyle::Literal, Element::Point(coord)))
        }
    }

    fn line_string_body(
        &mut self,
        model: CoordinateModel,
    ) -> MatrixResult<(ConstructionStyle, Element)> {
        if self.peek_ident() == Some("elements") {
            self.label("elements")?;
            let coords = self.ring(model)?;
            Ok((ConstructionStyle::Named, Element::LineString(coords)))
        } else {
            let coords = self.sequence(Token::RightParen, |reader| reader.coord(model))?;
            Ok((ConstructionStyle::Literal, Element::LineString(coords)))
        }
    }

    fn polygon_body(
        &mut self,
        model: CoordinateModel,
    ) -> MatrixResult<(ConstructionStyle, Element)> {
        let style = if self.peek_ident() == Some("rings") {
            self.label("rings")?;
            self.expect(Token::LeftParen)?;
            ConstructionStyle::Named
        } else {
            ConstructionStyle::Literal
        };

        let outer = self.ring(model)?;
        self.expect(Token::Comma)?;
        self.expect(Token::LeftBracket)?;
        let inners = self.sequence(Token::RightBracket, |reader| reader.ring(model))?;
        self.expect(Token::RightBracket)?;

        if style == ConstructionStyle::Named {
            self.expect(Token::RightParen)?;
        }
        Ok((style, Element::Polygon { outer, inners }))
    }

    /// `[(..), (..)]`
    fn ring(&mut self, model: CoordinateModel) -> MatrixResult<Vec<Coord>> {
        self.expect(Token::LeftBracket)?;
        let coords = self.sequence(Token::RightBracket, |reader| reader.coord(model))?;
        self.expect(Token::RightBracket)?;
        Ok(coords)
    }

    /// Comma-separated items up to, but not consuming, `close`.
    fn sequence<T>(
        &mut self,
        close: Token,
        mut item: impl FnMut(&mut Self) -> MatrixResult<T>,
    ) -> MatrixResult<Vec<T>> {
        let mut items = vec![];
        if self.peek() == Some(&close) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.peek() == Some(&Token::Comma) {
                self.pos += 1;
            } else {
                return Ok(items);
            }
        }
    }

    /// `(x: 1.0, y: 1.0)`
    fn coord(&mut self, model: CoordinateModel) -> MatrixResult<Coord> {
        self.expect(Token::LeftParen)?;
        let coord = self.ordinates(model)?;
        self.expect(Token::RightParen)?;
        Ok(coord)
    }

    /// `x: 1.0, y: 1.0`, with labels required to match `model`.
    fn ordinates(&mut self, model: CoordinateModel) -> MatrixResult<Coord> {
        let mut values = Vec::with_capacity(model.size());
        for (i, label) in model.labels().iter().enumerate() {
            if i > 0 {
                self.expect(Token::Comma)?;
            }
            self.label(label)?;
            values.push(self.number()?);
        }
        Coord::from_ordinates(model, &values).ok_or_else(|| {
            MatrixError::Parse(format!("Wrong number of ordinates for {model}"))
        })
    }
}
