//! Human-readable facts about one record.

use std::fmt;

use serde::Serialize;

use crate::category::Category;
use crate::geom::Geometry;
use crate::record::{FloorPlanRecord, OrientationMetadata, RecordId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanSummary {
    pub id: RecordId,
    pub area: f64,
    pub bedrooms: usize,
    pub bathrooms: usize,
    pub kitchen: bool,
    pub living: bool,
    pub balcony: bool,
    pub orientation: Option<OrientationMetadata>,
}

impl PlanSummary {
    /// Counts that cannot be evaluated are reported as 0.
    pub fn of<G: Geometry>(record: &FloorPlanRecord<G>) -> Self {
        Self {
            id: record.id,
            area: record.area,
            bedrooms: record.room_count(Category::Bedroom).unwrap_or(0),
            bathrooms: record.room_count(Category::Bathroom).unwrap_or(0),
            kitchen: record.has(Category::Kitchen),
            living: record.has(Category::Living),
            balcony: record.has(Category::Balcony),
            orientation: record.orientation.clone(),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "plan #{}", self.id)?;
        writeln!(f, "  total area: {:.2}", self.area)?;
        writeln!(f, "  bedrooms:   {}", self.bedrooms)?;
        writeln!(f, "  bathrooms:  {}", self.bathrooms)?;
        writeln!(f, "  kitchen:    {}", yes_no(self.kitchen))?;
        writeln!(f, "  living:     {}", yes_no(self.living))?;
        write!(f, "  balcony:    {}", yes_no(self.balcony))?;
        if let Some(o) = &self.orientation {
            writeln!(f)?;
            writeln!(f, "  orientation:")?;
            writeln!(f, "    compliance: {:.1}%", o.compliance_score)?;
            write!(f, "    rotation:   {:.1}°", o.rotation_degrees)?;
            for line in &o.report {
                write!(f, "\n    {line}")?;
            }
            if !o.unrotated.is_empty() {
                let names: Vec<&str> = o.unrotated.iter().map(|c| c.as_str()).collect();
                write!(f, "\n    not rotated: {}", names.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::record;

    #[test]
    fn summary_counts_and_text() {
        let mut r = record(88.0, 3, 1, true);
        r.id = 5;
        let s = PlanSummary::of(&r);
        assert_eq!((s.bedrooms, s.bathrooms), (3, 1));
        assert!(s.kitchen && !s.living && !s.balcony);
        let text = s.to_string();
        assert!(text.starts_with("plan #5"));
        assert!(text.contains("total area: 88.00"));
        assert!(!text.contains("orientation"));

        r.orientation = Some(OrientationMetadata {
            applied: true,
            rotation_degrees: 45.0,
            compliance_score: 87.5,
            report: vec!["kitchen: south_east — optimal".into()],
            unrotated: Vec::new(),
        });
        let text = PlanSummary::of(&r).to_string();
        assert!(text.contains("compliance: 87.5%"));
        assert!(text.ends_with("kitchen: south_east — optimal"));
    }
}
