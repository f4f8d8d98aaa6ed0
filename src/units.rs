//! Typed lengths. PDF content streams are written in points, label sheets are
//! specified in millimetres; keeping them as distinct newtypes makes it hard to
//! mix the two by accident.

use derive_more::{Add, AddAssign, Display, Div, From, Into, Mul, Sub, SubAssign, Sum};

const PT_PER_IN: f32 = 72.0;
const MM_PER_IN: f32 = 25.4;

/// PostScript points, 1/72 of an inch
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Mul,
    Div,
    Sum,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// Inches
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Mul,
    Div,
    Sum,
    Display,
    From,
    Into,
)]
pub struct In(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Mul,
    Div,
    Sum,
    Display,
    From,
    Into,
)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Pt {
        Pt(value.0 * PT_PER_IN)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Pt {
        Pt(value.0 * PT_PER_IN / MM_PER_IN)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> In {
        In(value.0 / PT_PER_IN)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Mm {
        Mm(value.0 * MM_PER_IN / PT_PER_IN)
    }
}

impl From<In> for Mm {
    fn from(value: In) -> Mm {
        Mm(value.0 * MM_PER_IN)
    }
}

impl From<Mm> for In {
    fn from(value: Mm) -> In {
        In(value.0 / MM_PER_IN)
    }
}
