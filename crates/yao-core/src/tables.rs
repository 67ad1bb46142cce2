//! Startup self-check over the constant tables.
//!
//! The tables are compile-time constants, so a failure here means the source
//! was edited into an inconsistent state. The check runs once per process
//! through [`ensure_tables`].

use crate::element::{Element, ElementRelation};
use crate::error::{CoreError, CoreResult};
use crate::ganzhi::{Branch, Pillar};
use crate::palace::{PalacePosition, classify, hexagram_bits};
use crate::relations::{
    LifeStage, SixRelation, THREE_HARMONY, THREE_MEETING, clashes, harmony_element, harms, tomb_of,
};
use crate::trigram::Trigram;

/// Run every consistency check and report the first failure.
pub fn verify_tables() -> CoreResult<()> {
    verify_palaces()?;
    verify_elements()?;
    verify_relations()?;
    verify_branch_groups()?;
    verify_void_decades()?;
    Ok(())
}

/// Run [`verify_tables`] once and cache the outcome.
pub fn ensure_tables() -> CoreResult<()> {
    (*CHECKED).clone()
}

lazy_static::lazy_static! {
    static ref CHECKED: CoreResult<()> = verify_tables();
}

fn corrupted(msg: String) -> CoreError {
    CoreError::TableCorruption(msg)
}

/// Every pattern lands in exactly one `(palace, position)` cell.
fn verify_palaces() -> CoreResult<()> {
    let mut seen = [[false; 8]; 8];
    for bits in 0u8..64 {
        let info = classify(bits)?;
        let cell = &mut seen[info.palace as usize][info.position.index()];
        if *cell {
            return Err(corrupted(format!(
                "{}宫{} reached twice",
                info.palace, info.position
            )));
        }
        *cell = true;
    }
    for t in Trigram::ALL {
        let pure = classify(hexagram_bits(t, t))?;
        if pure.palace != t || pure.position != PalacePosition::Pure {
            return Err(corrupted(format!("{t}为 is not pure")));
        }
    }
    Ok(())
}

/// Every element pair has exactly one relation, and the cycles close.
fn verify_elements() -> CoreResult<()> {
    for a in Element::ALL {
        let rels: Vec<ElementRelation> = Element::ALL.iter().map(|&b| a.relation_to(b)).collect();
        for expected in [
            ElementRelation::Same,
            ElementRelation::Generates,
            ElementRelation::GeneratedBy,
            ElementRelation::Controls,
            ElementRelation::ControlledBy,
        ] {
            if rels.iter().filter(|&&r| r == expected).count() != 1 {
                return Err(corrupted(format!("{a}: {expected:?} not unique")));
            }
        }
        if a.generates().generator() != a || a.controls().controller() != a {
            return Err(corrupted(format!("{a}: cycles do not invert")));
        }
    }
    Ok(())
}

/// The 5×5 relation table inverts through [`SixRelation::element_in`].
fn verify_relations() -> CoreResult<()> {
    for palace in Element::ALL {
        for rel in SixRelation::ALL {
            if SixRelation::of(palace, rel.element_in(palace)) != rel {
                return Err(corrupted(format!("{palace}宫 {rel} does not round-trip")));
            }
        }
    }
    Ok(())
}

fn verify_branch_groups() -> CoreResult<()> {
    for group in THREE_HARMONY {
        let [birth, peak, tomb] = group.members;
        if LifeStage::birth_branch(group.element) != birth
            || LifeStage::of(group.element, peak) != LifeStage::Peak
            || tomb_of(group.element) != tomb
        {
            return Err(corrupted(format!("三合{}局 misaligned", group.element)));
        }
    }
    for group in THREE_MEETING {
        let stray = group
            .members
            .iter()
            .any(|b| b.element() != group.element && b.element() != Element::Earth);
        if stray {
            return Err(corrupted(format!("三会{}局 misaligned", group.element)));
        }
    }
    for b in Branch::ALL {
        if Branch::ALL.iter().filter(|&&o| clashes(b, o)).count() != 1 {
            return Err(corrupted(format!("{b} clash not unique")));
        }
        let partners: Vec<Branch> = Branch::ALL
            .into_iter()
            .filter(|&o| harmony_element(b, o).is_some())
            .collect();
        if partners.len() != 1 {
            return Err(corrupted(format!("{b} harmony not unique")));
        }
        if Branch::ALL.iter().filter(|&&o| harms(b, o)).count() != 1 {
            return Err(corrupted(format!("{b} harm not unique")));
        }
    }
    Ok(())
}

fn verify_void_decades() -> CoreResult<()> {
    for n in 0..60 {
        let day = Pillar::from_cycle_index(n);
        let [a, b] = day.kong();
        if a.advance(1) != b || a == day.branch || b == day.branch {
            return Err(corrupted(format!("{day} void {a}{b} malformed")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_consistent() {
        assert_eq!(verify_tables(), Ok(()));
        assert_eq!(ensure_tables(), Ok(()));
    }
}
