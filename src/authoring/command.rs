use glam::Vec3;

use crate::error::ParseError;

/// Authoring verbs, selected by a three-character message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    CreateObject,
    CreateObjectAtPoint,
    CreatePoint,
    MoveToPoint,
}

impl Verb {
    pub const PREFIX_LEN: usize = 3;

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "OBJ" => Some(Verb::CreateObject),
            "ATP" => Some(Verb::CreateObjectAtPoint),
            "PNT" => Some(Verb::CreatePoint),
            "MOV" => Some(Verb::MoveToPoint),
            _ => None,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Verb::CreateObject => "OBJ",
            Verb::CreateObjectAtPoint => "ATP",
            Verb::CreatePoint => "PNT",
            Verb::MoveToPoint => "MOV",
        }
    }

    /// Number of whitespace-separated tokens after the prefix.
    pub fn arity(self) -> usize {
        match self {
            Verb::CreateObject => 14,
            Verb::CreateObjectAtPoint => 12,
            Verb::CreatePoint => 4,
            Verb::MoveToPoint => 2,
        }
    }
}

/// Everything about a new object except where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpec {
    pub name: String,
    pub scale: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub model: String,
    pub material1: String,
    pub material2: String,
    pub visible: bool,
}

impl ObjectSpec {
    /// `material1` when visible, `material2` otherwise.
    pub fn material(&self) -> &str {
        if self.visible {
            &self.material1
        } else {
            &self.material2
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthoringCommand {
    CreateObject { spec: ObjectSpec, position: Vec3 },
    CreateObjectAtPoint { spec: ObjectSpec, point: String },
    CreatePoint { name: String, position: Vec3 },
    MoveToPoint { name: String, point: String },
}

impl AuthoringCommand {
    pub fn parse<S: AsRef<str>>(verb: Verb, tokens: &[S]) -> Result<Self, ParseError> {
        if tokens.len() != verb.arity() {
            return Err(ParseError::WrongArity {
                verb: verb.prefix(),
                expected: verb.arity(),
                found: tokens.len(),
            });
        }

        let mut fields = Fields::new(verb, tokens);
        let command = match verb {
            Verb::CreateObject => {
                let name = fields.text();
                let position = fields.vec3()?;
                AuthoringCommand::CreateObject {
                    spec: fields.object_spec(name)?,
                    position,
                }
            }
            Verb::CreateObjectAtPoint => {
                let name = fields.text();
                let point = fields.text();
                AuthoringCommand::CreateObjectAtPoint {
                    spec: fields.object_spec(name)?,
                    point,
                }
            }
            Verb::CreatePoint => AuthoringCommand::CreatePoint {
                name: fields.text(),
                position: fields.vec3()?,
            },
            Verb::MoveToPoint => AuthoringCommand::MoveToPoint {
                name: fields.text(),
                point: fields.text(),
            },
        };

        Ok(command)
    }

    pub fn verb(&self) -> Verb {
        match self {
            AuthoringCommand::CreateObject { .. } => Verb::CreateObject,
            AuthoringCommand::CreateObjectAtPoint { .. } => Verb::CreateObjectAtPoint,
            AuthoringCommand::CreatePoint { .. } => Verb::CreatePoint,
            AuthoringCommand::MoveToPoint { .. } => Verb::MoveToPoint,
        }
    }
}

/// Positional reader over an arity-checked token list.
struct Fields<'a, S> {
    verb: Verb,
    tokens: &'a [S],
    index: usize,
}

impl<'a, S: AsRef<str>> Fields<'a, S> {
    fn new(verb: Verb, tokens: &'a [S]) -> Self {
        Self {
            verb,
            tokens,
            index: 0,
        }
    }

    fn next(&mut self) -> (usize, &'a str) {
        let index = self.index;
        let tokens = self.tokens;
        self.index += 1;
        (index, tokens[index].as_ref())
    }

    fn text(&mut self) -> String {
        self.next().1.to_string()
    }

    fn number(&mut self) -> Result<f32, ParseError> {
        let (index, token) = self.next();
        token.parse().map_err(|_| ParseError::InvalidNumber {
            verb: self.verb.prefix(),
            index,
            token: token.to_string(),
        })
    }

    fn vec3(&mut self) -> Result<Vec3, ParseError> {
        Ok(Vec3::new(self.number()?, self.number()?, self.number()?))
    }

    fn flag(&mut self) -> Result<bool, ParseError> {
        let (index, token) = self.next();
        token
            .parse::<i32>()
            .map(|value| value != 0)
            .map_err(|_| ParseError::InvalidFlag {
                verb: self.verb.prefix(),
                index,
                token: token.to_string(),
            })
    }

    /// Reads `sx sy sz qx qy qz model mat1 mat2 vis`.
    fn object_spec(&mut self, name: String) -> Result<ObjectSpec, ParseError> {
        Ok(ObjectSpec {
            name,
            scale: self.vec3()?,
            rotation: self.vec3()?,
            model: self.text(),
            material1: self.text(),
            material2: self.text(),
            visible: self.flag()?,
        })
    }
}
