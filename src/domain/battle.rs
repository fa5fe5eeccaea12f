//! Fight scoring between two records.

use std::cmp::Ordering;

use crate::domain::record::Record;

const HP_WEIGHT: f64 = 1.2;
const ATTACK_WEIGHT: f64 = 1.5;

pub fn strength(record: &Record) -> f64 {
    f64::from(record.hp) * HP_WEIGHT + f64::from(record.attack) * ATTACK_WEIGHT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightResult {
    FirstWins,
    SecondWins,
    Tie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FightReport<'c> {
    pub first: &'c Record,
    pub second: &'c Record,
    pub first_score: f64,
    pub second_score: f64,
    pub result: FightResult,
}

impl<'c> FightReport<'c> {
    pub fn winner(&self) -> Option<&'c Record> {
        match self.result {
            FightResult::FirstWins => Some(self.first),
            FightResult::SecondWins => Some(self.second),
            FightResult::Tie => None,
        }
    }
}

pub fn fight<'c>(first: &'c Record, second: &'c Record) -> FightReport<'c> {
    let first_score = strength(first);
    let second_score = strength(second);
    let result = match first_score.partial_cmp(&second_score) {
        Some(Ordering::Greater) => FightResult::FirstWins,
        Some(Ordering::Less) => FightResult::SecondWins,
        _ => FightResult::Tie,
    };
    FightReport {
        first,
        second,
        first_score,
        second_score,
        result,
    }
}
