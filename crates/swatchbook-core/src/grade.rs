// ABOUTME: WCAG 2.x contrast grading for background/foreground pairs
// ABOUTME: Grades normal and large text separately against the literal WCAG thresholds

use serde::Serialize;
use std::fmt;
use swatchbook_types::Color;

use crate::pairing::ColorPair;

/// WCAG contrast thresholds
pub struct WcagThresholds;

impl WcagThresholds {
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AA_NORMAL: f64 = 4.5;
    pub const AAA_LARGE: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WcagGrade {
    Fail,
    Aa,
    Aaa,
}

impl WcagGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            WcagGrade::Aaa => "AAA",
            WcagGrade::Aa => "AA",
            WcagGrade::Fail => "FAIL",
        }
    }

    pub fn passes(&self) -> bool {
        *self != WcagGrade::Fail
    }
}

impl fmt::Display for WcagGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub normal_text: WcagGrade,
    pub large_text: WcagGrade,
}

impl ContrastResult {
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            normal_text: ContrastGrader::normal_text_grade(ratio),
            large_text: ContrastGrader::large_text_grade(ratio),
        }
    }

    /// e.g. `21.00:1 AAA / AAA`
    pub fn label(&self) -> String {
        format!(
            "{:.2}:1 {} / {}",
            self.ratio, self.normal_text, self.large_text
        )
    }
}

pub struct ContrastGrader;

impl ContrastGrader {
    /// Grade a pair, or `None` when either side is missing
    pub fn grade(pair: &ColorPair<'_>) -> Option<ContrastResult> {
        let background = pair.background?;
        let foreground = pair.foreground?;
        Some(Self::grade_colors(background.color(), foreground.color()))
    }

    pub fn grade_colors(background: Color, foreground: Color) -> ContrastResult {
        ContrastResult::from_ratio(background.contrast_ratio(&foreground))
    }

    pub fn normal_text_grade(ratio: f64) -> WcagGrade {
        if ratio >= WcagThresholds::AAA_NORMAL {
            WcagGrade::Aaa
        } else if ratio >= WcagThresholds::AA_NORMAL {
            WcagGrade::Aa
        } else {
            WcagGrade::Fail
        }
    }

    pub fn large_text_grade(ratio: f64) -> WcagGrade {
        if ratio >= WcagThresholds::AAA_LARGE {
            WcagGrade::Aaa
        } else if ratio >= WcagThresholds::AA_LARGE {
            WcagGrade::Aa
        } else {
            WcagGrade::Fail
        }
    }
}
