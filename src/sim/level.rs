//! Platformer level data
//!
//! Levels come from a JSON document. Positions and sizes may depend on the
//! canvas size, written either as plain numbers, as small linear formulas
//! (`"canvas.width / 2 - 75"`) or as explicit anchor objects. Formulas are
//! parsed into [`Dim`] up front; nothing in a level file is ever executed.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::rect::Rect;
use super::state::Viewport;

/// Built-in level set, also used when a fetched file is unusable
const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

/// Canvas dimension a relative value is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Width,
    Height,
}

impl Anchor {
    fn of(self, viewport: Viewport) -> f32 {
        match self {
            Anchor::Width => viewport.width,
            Anchor::Height => viewport.height,
        }
    }
}

/// One numeric field of a level file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawDim")]
pub enum Dim {
    /// Fixed pixel value
    Absolute(f32),
    /// `anchor * scale + offset`
    Relative {
        anchor: Anchor,
        scale: f32,
        offset: f32,
    },
}

impl Dim {
    /// Evaluate against the live canvas size
    pub fn resolve(&self, viewport: Viewport) -> f32 {
        match *self {
            Dim::Absolute(v) => v,
            Dim::Relative {
                anchor,
                scale,
                offset,
            } => anchor.of(viewport) * scale + offset,
        }
    }
}

/// Accepted JSON shapes for a [`Dim`]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDim {
    Number(f32),
    Formula(String),
    Anchored {
        anchor: Anchor,
        #[serde(default = "unit_scale")]
        scale: f32,
        #[serde(default)]
        offset: f32,
    },
}

fn unit_scale() -> f32 {
    1.0
}

impl TryFrom<RawDim> for Dim {
    type Error = FormulaError;

    fn try_from(raw: RawDim) -> Result<Self, Self::Error> {
        let dim = match raw {
            RawDim::Number(v) => Dim::Absolute(v),
            RawDim::Formula(src) => src.parse()?,
            RawDim::Anchored {
                anchor,
                scale,
                offset,
            } => Dim::Relative {
                anchor,
                scale,
                offset,
            },
        };
        match dim {
            Dim::Absolute(v) if !v.is_finite() => Err(FormulaError::NotFinite),
            Dim::Relative { scale, offset, .. } if !scale.is_finite() || !offset.is_finite() => {
                Err(FormulaError::NotFinite)
            }
            _ => Ok(dim),
        }
    }
}

/// Why a formula string was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    UnexpectedChar { ch: char, at: usize },
    BadNumber(String),
    UnknownIdentifier(String),
    UnexpectedEnd,
    /// An operator where a number or canvas term belongs
    UnexpectedToken(char),
    TrailingInput,
    /// Longer than [`MAX_FORMULA_LEN`] bytes
    TooLong(usize),
    /// Both `canvas.width` and `canvas.height` in one formula
    MixedAnchors,
    /// Product or quotient of two canvas terms
    NonLinear,
    DivisionByZero,
    NotFinite,
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::UnexpectedChar { ch, at } => {
                write!(f, "unexpected character '{}' at offset {}", ch, at)
            }
            FormulaError::BadNumber(text) => write!(f, "malformed number '{}'", text),
            FormulaError::UnknownIdentifier(name) => write!(
                f,
                "unknown identifier '{}' (only canvas.width and canvas.height are allowed)",
                name
            ),
            FormulaError::UnexpectedEnd => write!(f, "formula ends unexpectedly"),
            FormulaError::UnexpectedToken(op) => {
                write!(f, "expected a number or canvas term, found '{}'", op)
            }
            FormulaError::TrailingInput => write!(f, "unexpected input after formula"),
            FormulaError::TooLong(len) => write!(
                f,
                "formula is {} bytes long, the limit is {}",
                len, MAX_FORMULA_LEN
            ),
            FormulaError::MixedAnchors => {
                write!(f, "a formula may reference canvas.width or canvas.height, not both")
            }
            FormulaError::NonLinear => write!(f, "canvas terms cannot be multiplied or divided together"),
            FormulaError::DivisionByZero => write!(f, "division by zero"),
            FormulaError::NotFinite => write!(f, "value is not a finite number"),
        }
    }
}

impl std::error::Error for FormulaError {}

/// Longest formula string accepted from a level file
pub const MAX_FORMULA_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f32),
    Anchor(Anchor),
    Plus,
    Minus,
    Star,
    Slash,
}

impl Token {
    fn symbol(self) -> char {
        match self {
            Token::Plus => '+',
            Token::Minus => '-',
            Token::Star => '*',
            Token::Slash => '/',
            Token::Num(_) => '0',
            Token::Anchor(_) => 'c',
        }
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    _ => Token::Slash,
                });
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &src[start..end];
                let value = text
                    .parse::<f32>()
                    .map_err(|_| FormulaError::BadNumber(text.to_string()))?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let anchor = match &src[start..end] {
                    "canvas.width" => Anchor::Width,
                    "canvas.height" => Anchor::Height,
                    other => return Err(FormulaError::UnknownIdentifier(other.to_string())),
                };
                tokens.push(Token::Anchor(anchor));
            }
            other => return Err(FormulaError::UnexpectedChar { ch: other, at: start }),
        }
    }

    Ok(tokens)
}

/// `anchor * scale + offset`, or a plain constant when `anchor` is `None`
#[derive(Debug, Clone, Copy)]
struct Linear {
    anchor: Option<Anchor>,
    scale: f32,
    offset: f32,
}

impl Linear {
    fn constant(value: f32) -> Self {
        Self {
            anchor: None,
            scale: 0.0,
            offset: value,
        }
    }

    fn anchored(anchor: Anchor) -> Self {
        Self {
            anchor: Some(anchor),
            scale: 1.0,
            offset: 0.0,
        }
    }

    fn scaled(self, k: f32) -> Self {
        Self {
            anchor: self.anchor,
            scale: self.scale * k,
            offset: self.offset * k,
        }
    }

    fn add(self, other: Linear, sign: f32) -> Result<Self, FormulaError> {
        let anchor = match (self.anchor, other.anchor) {
            (Some(a), Some(b)) if a != b => return Err(FormulaError::MixedAnchors),
            (a, b) => a.or(b),
        };
        Ok(Self {
            anchor,
            scale: self.scale + sign * other.scale,
            offset: self.offset + sign * other.offset,
        })
    }

    fn mul(self, other: Linear) -> Result<Self, FormulaError> {
        match (self.anchor, other.anchor) {
            (Some(_), Some(_)) => Err(FormulaError::NonLinear),
            (None, _) => Ok(other.scaled(self.offset)),
            (_, None) => Ok(self.scaled(other.offset)),
        }
    }

    fn div(self, other: Linear) -> Result<Self, FormulaError> {
        if other.anchor.is_some() {
            return Err(FormulaError::NonLinear);
        }
        if other.offset == 0.0 {
            return Err(FormulaError::DivisionByZero);
        }
        Ok(self.scaled(1.0 / other.offset))
    }
}

/// Recursive-descent parser over `expr := term (('+'|'-') term)*`,
/// `term := factor (('*'|'/') factor)*`, `factor := '-' factor | number | anchor`
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<Linear, FormulaError> {
        let mut acc = self.term()?;
        loop {
            let sign = match self.peek() {
                Some(Token::Plus) => 1.0,
                Some(Token::Minus) => -1.0,
                _ => return Ok(acc),
            };
            self.pos += 1;
            let rhs = self.term()?;
            acc = acc.add(rhs, sign)?;
        }
    }

    fn term(&mut self) -> Result<Linear, FormulaError> {
        let mut acc = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    acc = acc.mul(rhs)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    acc = acc.div(rhs)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<Linear, FormulaError> {
        // A run of unary minus folds into one sign
        let mut sign = 1.0;
        while self.peek() == Some(Token::Minus) {
            self.pos += 1;
            sign = -sign;
        }
        match self.next() {
            Some(Token::Num(v)) => Ok(Linear::constant(v).scaled(sign)),
            Some(Token::Anchor(a)) => Ok(Linear::anchored(a).scaled(sign)),
            Some(token) => Err(FormulaError::UnexpectedToken(token.symbol())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

impl FromStr for Dim {
    type Err = FormulaError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.len() > MAX_FORMULA_LEN {
            return Err(FormulaError::TooLong(src.len()));
        }
        let mut parser = Parser {
            tokens: tokenize(src)?,
            pos: 0,
        };
        let linear = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(FormulaError::TrailingInput);
        }

        Ok(match linear.anchor {
            None => Dim::Absolute(linear.offset),
            Some(anchor) => Dim::Relative {
                anchor,
                scale: linear.scale,
                offset: linear.offset,
            },
        })
    }
}

/// A rectangle as written in a level file
#[derive(Debug, Clone, Deserialize)]
pub struct RectDesc {
    pub x: Dim,
    pub y: Dim,
    pub width: Dim,
    pub height: Dim,
}

impl RectDesc {
    fn resolve(&self, viewport: Viewport) -> Rect {
        Rect::new(
            self.x.resolve(viewport),
            self.y.resolve(viewport),
            self.width.resolve(viewport),
            self.height.resolve(viewport),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinDesc {
    pub x: Dim,
    pub y: Dim,
    pub size: Dim,
}

/// One level as written in the file
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDesc {
    pub platforms: Vec<RectDesc>,
    pub coin: CoinDesc,
    pub door: RectDesc,
}

/// Collectible gating the door; `collected` only ever goes false → true
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
}

/// A level resolved against a concrete canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub platforms: Vec<Rect>,
    pub coin: Coin,
    pub door: Rect,
}

impl LevelDesc {
    pub fn resolve(&self, viewport: Viewport) -> Level {
        let size = self.coin.size.resolve(viewport);
        Level {
            platforms: self.platforms.iter().map(|p| p.resolve(viewport)).collect(),
            coin: Coin {
                rect: Rect::new(
                    self.coin.x.resolve(viewport),
                    self.coin.y.resolve(viewport),
                    size,
                    size,
                ),
                collected: false,
            },
            door: self.door.resolve(viewport),
        }
    }

    /// Check that this level is playable on `viewport`
    pub(crate) fn validate(&self, level: usize, viewport: Viewport) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms { level });
        }

        let resolved = self.resolve(viewport);
        let mut boxes: Vec<(&'static str, Rect)> = resolved
            .platforms
            .iter()
            .map(|p| ("platform", *p))
            .collect();
        boxes.push(("coin", resolved.coin.rect));
        boxes.push(("door", resolved.door));

        for (what, rect) in boxes {
            if ![rect.x, rect.y, rect.w, rect.h].iter().all(|v| v.is_finite()) {
                return Err(LevelError::NonFinite { level, what });
            }
            let smallest = rect.w.min(rect.h);
            if smallest <= 0.0 {
                return Err(LevelError::BadSize {
                    level,
                    what,
                    value: smallest,
                });
            }
        }
        Ok(())
    }
}

/// Why a level file could not be used
#[derive(Debug)]
pub enum LevelError {
    /// Not valid JSON, wrong shape, or a rejected formula
    Json(serde_json::Error),
    /// The file holds no levels
    Empty,
    NoPlatforms {
        level: usize,
    },
    BadSize {
        level: usize,
        what: &'static str,
        value: f32,
    },
    NonFinite {
        level: usize,
        what: &'static str,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Json(err) => write!(f, "invalid level file: {}", err),
            LevelError::Empty => write!(f, "level file contains no levels"),
            LevelError::NoPlatforms { level } => write!(f, "level {} has no platforms", level),
            LevelError::BadSize { level, what, value } => write!(
                f,
                "level {}: {} has non-positive size {}",
                level, what, value
            ),
            LevelError::NonFinite { level, what } => {
                write!(f, "level {}: {} has a non-finite coordinate", level, what)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Json(err)
    }
}

#[derive(Deserialize)]
struct LevelFile {
    levels: Vec<LevelDesc>,
}

/// The ordered, validated set of levels; level numbers are 1-based
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<LevelDesc>,
}

impl LevelSet {
    /// Parse and validate a level file against the current canvas size
    pub fn from_json(json: &str, viewport: Viewport) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        if file.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in file.levels.iter().enumerate() {
            level.validate(i + 1, viewport)?;
        }
        Ok(Self {
            levels: file.levels,
        })
    }

    /// Levels shipped inside the binary
    pub fn builtin(viewport: Viewport) -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS, viewport)
    }

    /// Use `json` if it is a valid level file, otherwise fall back to the
    /// built-in set. The error that forced the fallback is handed back so the
    /// caller can show it.
    pub fn load_or_builtin(json: Option<&str>, viewport: Viewport) -> (Self, Option<LevelError>) {
        let err = match json.map(|j| Self::from_json(j, viewport)) {
            Some(Ok(set)) => return (set, None),
            Some(Err(err)) => {
                log::error!("Level data rejected: {}", err);
                Some(err)
            }
            None => None,
        };

        match Self::builtin(viewport) {
            Ok(set) => {
                log::warn!("Using built-in levels ({} levels)", set.len());
                (set, err)
            }
            Err(builtin_err) => {
                log::error!("Built-in levels unusable on this canvas: {}", builtin_err);
                (Self::single_floor(), err.or(Some(builtin_err)))
            }
        }
    }

    /// A one-level set that fits any canvas: a floor, a coin and a door
    pub fn single_floor() -> Self {
        let floor_top = Dim::Relative {
            anchor: Anchor::Height,
            scale: 1.0,
            offset: -20.0,
        };
        Self {
            levels: vec![LevelDesc {
                platforms: vec![RectDesc {
                    x: Dim::Absolute(0.0),
                    y: floor_top,
                    width: Dim::Relative {
                        anchor: Anchor::Width,
                        scale: 1.0,
                        offset: 0.0,
                    },
                    height: Dim::Absolute(20.0),
                }],
                coin: CoinDesc {
                    x: Dim::Relative {
                        anchor: Anchor::Width,
                        scale: 0.5,
                        offset: 0.0,
                    },
                    y: Dim::Relative {
                        anchor: Anchor::Height,
                        scale: 1.0,
                        offset: -60.0,
                    },
                    size: Dim::Absolute(20.0),
                },
                door: RectDesc {
                    x: Dim::Relative {
                        anchor: Anchor::Width,
                        scale: 1.0,
                        offset: -100.0,
                    },
                    y: Dim::Relative {
                        anchor: Anchor::Height,
                        scale: 1.0,
                        offset: -100.0,
                    },
                    width: Dim::Absolute(50.0),
                    height: Dim::Absolute(80.0),
                },
            }],
        }
    }

    /// Level 1 of [`LevelSet::single_floor`], resolved; playable on any canvas
    pub fn floor_level(viewport: Viewport) -> Level {
        Self::single_floor().levels[0].resolve(viewport)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level by 1-based number
    pub fn get(&self, number: usize) -> Option<&LevelDesc> {
        number.checked_sub(1).and_then(|i| self.levels.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn eval(src: &str) -> f32 {
        src.parse::<Dim>().unwrap().resolve(VIEWPORT)
    }

    #[test]
    fn test_formulas_resolve_against_canvas() {
        assert_eq!(eval("canvas.width / 2 - 75"), 325.0);
        assert_eq!(eval("canvas.height - 100"), 500.0);
        assert_eq!(eval("canvas.height*0.5+10"), 310.0);
        assert_eq!(eval("0.25 * canvas.width"), 200.0);
        assert_eq!(eval("-50 + canvas.width"), 750.0);
        assert_eq!(eval("200"), 200.0);
    }

    #[test]
    fn test_plain_formula_is_absolute() {
        assert_eq!("10 * 3 - 5".parse::<Dim>().unwrap(), Dim::Absolute(25.0));
    }

    #[test]
    fn test_code_is_rejected() {
        assert!(matches!(
            "alert(1)".parse::<Dim>(),
            Err(FormulaError::UnknownIdentifier(_))
        ));
        assert!(matches!(
            "canvas.width; fetch('x')".parse::<Dim>(),
            Err(FormulaError::UnexpectedChar { ch: ';', .. })
        ));
        assert!(matches!(
            "window.innerWidth".parse::<Dim>(),
            Err(FormulaError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn test_malformed_formulas() {
        assert_eq!(
            "canvas.width - canvas.height".parse::<Dim>(),
            Err(FormulaError::MixedAnchors)
        );
        assert_eq!(
            "canvas.width * canvas.width".parse::<Dim>(),
            Err(FormulaError::NonLinear)
        );
        assert_eq!("canvas.width / 0".parse::<Dim>(), Err(FormulaError::DivisionByZero));
        assert_eq!("canvas.width -".parse::<Dim>(), Err(FormulaError::UnexpectedEnd));
        assert_eq!("1 2".parse::<Dim>(), Err(FormulaError::TrailingInput));
        assert_eq!("* 5".parse::<Dim>(), Err(FormulaError::UnexpectedToken('*')));
        assert_eq!(
            "canvas.width + * 2".parse::<Dim>(),
            Err(FormulaError::UnexpectedToken('*'))
        );
        assert!(matches!("1.2.3".parse::<Dim>(), Err(FormulaError::BadNumber(_))));
    }

    #[test]
    fn test_unary_minus_runs() {
        assert_eq!(eval("--5"), 5.0);
        assert_eq!(eval("---canvas.width + 1000"), 200.0);
        assert_eq!(eval("canvas.height - -10"), 610.0);
        let long = "-".repeat(MAX_FORMULA_LEN + 1) + "5";
        assert_eq!(long.parse::<Dim>(), Err(FormulaError::TooLong(MAX_FORMULA_LEN + 2)));
    }

    #[test]
    fn test_huge_formula_falls_back_to_builtin() {
        let x = "-".repeat(20_000) + "5";
        let json = format!(
            r#"{{ "levels": [ {{
                "platforms": [ {{ "x": "{}", "y": 0, "width": 10, "height": 10 }} ],
                "coin": {{ "x": 0, "y": 0, "size": 10 }},
                "door": {{ "x": 0, "y": 0, "width": 10, "height": 10 }}
            }} ] }}"#,
            x
        );
        let (set, err) = LevelSet::load_or_builtin(Some(&json), VIEWPORT);
        assert_eq!(set.len(), 3);
        assert!(matches!(err, Some(LevelError::Json(_))));
    }

    #[test]
    fn test_json_dim_shapes() {
        let dims: Vec<Dim> = serde_json::from_str(
            r#"[12, "canvas.width - 100", { "anchor": "height", "scale": 0.5 }]"#,
        )
        .unwrap();
        assert_eq!(dims[0], Dim::Absolute(12.0));
        assert_eq!(dims[1].resolve(VIEWPORT), 700.0);
        assert_eq!(dims[2].resolve(VIEWPORT), 300.0);
    }

    #[test]
    fn test_bad_formula_in_file_is_a_json_error() {
        let json = r#"{ "levels": [ {
            "platforms": [ { "x": "eval('x')", "y": 0, "width": 10, "height": 10 } ],
            "coin": { "x": 0, "y": 0, "size": 10 },
            "door": { "x": 0, "y": 0, "width": 10, "height": 10 }
        } ] }"#;
        let err = LevelSet::from_json(json, VIEWPORT).unwrap_err();
        assert!(matches!(err, LevelError::Json(_)));
        assert!(err.to_string().contains("unknown identifier"));
    }

    #[test]
    fn test_builtin_levels_are_valid() {
        let set = LevelSet::builtin(VIEWPORT).unwrap();
        assert_eq!(set.len(), 3);
        let first = set.get(1).unwrap().resolve(VIEWPORT);
        assert!(!first.platforms.is_empty());
        assert!(!first.coin.collected);
        assert!(set.get(0).is_none());
        assert!(set.get(4).is_none());
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            LevelSet::from_json(r#"{ "levels": [] }"#, VIEWPORT),
            Err(LevelError::Empty)
        ));

        let no_platforms = r#"{ "levels": [ {
            "platforms": [],
            "coin": { "x": 0, "y": 0, "size": 10 },
            "door": { "x": 0, "y": 0, "width": 10, "height": 10 }
        } ] }"#;
        assert!(matches!(
            LevelSet::from_json(no_platforms, VIEWPORT),
            Err(LevelError::NoPlatforms { level: 1 })
        ));

        let negative = r#"{ "levels": [ {
            "platforms": [ { "x": 0, "y": 0, "width": "canvas.width - 1000", "height": 10 } ],
            "coin": { "x": 0, "y": 0, "size": 10 },
            "door": { "x": 0, "y": 0, "width": 10, "height": 10 }
        } ] }"#;
        assert!(matches!(
            LevelSet::from_json(negative, VIEWPORT),
            Err(LevelError::BadSize { level: 1, what: "platform", .. })
        ));
    }

    #[test]
    fn test_fallback_to_builtin() {
        let (set, err) = LevelSet::load_or_builtin(Some("{ not json"), VIEWPORT);
        assert_eq!(set.len(), 3);
        assert!(matches!(err, Some(LevelError::Json(_))));

        let (set, err) = LevelSet::load_or_builtin(None, VIEWPORT);
        assert_eq!(set.len(), 3);
        assert!(err.is_none());
    }

    #[test]
    fn test_single_floor_fits_small_canvas() {
        let tiny = Viewport {
            width: 200.0,
            height: 150.0,
        };
        let set = LevelSet::single_floor();
        let level = set.get(1).unwrap();
        assert!(level.validate(1, tiny).is_ok());
        let resolved = level.resolve(tiny);
        assert_eq!(resolved.platforms[0], Rect::new(0.0, 130.0, 200.0, 20.0));
        assert_eq!(LevelSet::floor_level(tiny), resolved);
    }
}
