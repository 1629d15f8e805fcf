use crate::term::Term;
use std::fmt;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Applied left to right while normalizing
    Directional,
    /// Applied either way while searching for a proof
    Bidirectional,
    /// Enforced by the parser and the term model, never applied
    Structural,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// condition => conclusion
    Forward,
    /// conclusion => condition
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "→"),
            Direction::Backward => write!(f, "←"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// 1-based position in the rule set
    pub id: usize,
    pub name: String,
    pub condition: Term,
    pub conclusion: Term,
    pub orientation: Orientation,
}

impl Rule {
    pub fn new(
        id: usize,
        name: &str,
        condition: Term,
        conclusion: Term,
        orientation: Orientation,
    ) -> Rule {
        Rule {
            id,
            name: String::from(name),
            condition,
            conclusion,
            orientation,
        }
    }

    /// Pattern and replacement when applied in the given direction
    pub fn sides(&self, direction: Direction) -> (&Term, &Term) {
        match direction {
            Direction::Forward => (&self.condition, &self.conclusion),
            Direction::Backward => (&self.conclusion, &self.condition),
        }
    }

    /// Whether the rewrite engine may apply this rule in the given direction
    pub fn applicable(&self, direction: Direction) -> bool {
        match self.orientation {
            Orientation::Directional => direction == Direction::Forward,
            Orientation::Bidirectional => true,
            Orientation::Structural => false,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let relation = match self.orientation {
            Orientation::Directional => "=>",
            _ => "<=>",
        };
        write!(f, "{} {} {}", self.condition, relation, self.conclusion)
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    fn head_recursion() -> Rule {
        let v = Term::var("v");
        Rule::new(
            2,
            "head-recursion",
            Term::head_closed(v.clone()),
            Term::link(Term::head_closed(v.clone()), v),
            Orientation::Bidirectional,
        )
    }

    #[test]
    fn sides_swap_backward() {
        let rule = head_recursion();
        assert_eq!(rule.sides(Direction::Forward).0, &rule.condition);
        assert_eq!(rule.sides(Direction::Backward).0, &rule.conclusion);
        assert_eq!(rule.sides(Direction::Backward).1, &rule.condition);
    }

    #[test]
    fn applicability() {
        let mut rule = head_recursion();
        assert!(rule.applicable(Direction::Backward));

        rule.orientation = Orientation::Directional;
        assert!(rule.applicable(Direction::Forward));
        assert!(!rule.applicable(Direction::Backward));

        rule.orientation = Orientation::Structural;
        assert!(!rule.applicable(Direction::Forward));
    }

    #[test]
    fn display() {
        assert_eq!(head_recursion().to_string(), "♂v <=> ♂v → v");
    }
}
