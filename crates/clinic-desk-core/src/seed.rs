//! Built-in datasets.
//!
//! Seeded into a fresh store, and the medication list doubles as the
//! fallback when the store cannot be queried.

use crate::db::{Database, DbResult};
use crate::models::{LocalNumber, ReferenceItem, TermKind};

/// Common medications with the slugs the BNF uses for them.
pub fn common_medications() -> Vec<ReferenceItem> {
    vec![
        // Antibiotics
        ReferenceItem::new("Amoxicillin", "amoxicillin"),
        ReferenceItem::new("Flucloxacillin", "flucloxacillin"),
        ReferenceItem::new("Clarithromycin", "clarithromycin"),
        ReferenceItem::new("Penicillin V", "phenoxymethylpenicillin"),
        ReferenceItem::new("Doxycycline", "doxycycline"),
        ReferenceItem::new("Trimethoprim", "trimethoprim"),
        ReferenceItem::new("Nitrofurantoin", "nitrofurantoin"),
        ReferenceItem::new("Metronidazole", "metronidazole"),
        ReferenceItem::new("Co-amoxiclav", "co-amoxiclav"),
        ReferenceItem::new("Erythromycin", "erythromycin"),
        ReferenceItem::new("Azithromycin", "azithromycin"),
        ReferenceItem::new("Cefalexin", "cefalexin"),
        ReferenceItem::new("Clindamycin", "clindamycin"),
        ReferenceItem::new("Gentamicin", "gentamicin"),
        ReferenceItem::new("Vancomycin", "vancomycin"),

        // Pain and inflammation
        ReferenceItem::new("Ibuprofen", "ibuprofen"),
        ReferenceItem::new("Paracetamol", "paracetamol"),
        ReferenceItem::new("Codeine", "codeine-phosphate"),
        ReferenceItem::new("Morphine", "morphine"),
        ReferenceItem::new("Tramadol", "tramadol-hydrochloride"),
        ReferenceItem::new("Naproxen", "naproxen"),
        ReferenceItem::new("Diclofenac", "diclofenac-sodium"),
        ReferenceItem::new("Aspirin", "aspirin"),
        ReferenceItem::new("Oxycodone", "oxycodone-hydrochloride"),
        ReferenceItem::new("Fentanyl", "fentanyl"),
        ReferenceItem::new("Pregabalin", "pregabalin"),
        ReferenceItem::new("Gabapentin", "gabapentin"),

        // Gastrointestinal
        ReferenceItem::new("Omeprazole", "omeprazole"),
    ]
}

/// Common CKS topics.
pub fn common_conditions() -> Vec<ReferenceItem> {
    vec![
        ReferenceItem::new("Gout", "gout"),
        ReferenceItem::new("Migraine", "migraine"),
        ReferenceItem::new(
            "Benign Paroxysmal Positional Vertigo (BPPV)",
            "benign-paroxysmal-positional-vertigo",
        ),
        ReferenceItem::new("Otitis Media", "otitis-media"),
        ReferenceItem::new("Urinary Tract Infection (UTI)", "urinary-tract-infection"),
    ]
}

/// Useful local service numbers.
pub fn local_numbers() -> Vec<LocalNumber> {
    vec![
        // Hospitals
        LocalNumber::new("Birmingham Children's Hospital", "0121 333 9999", "Hospitals", Some("Emergency and general enquiries")),
        LocalNumber::new("Queen Elizabeth Hospital", "0121 371 2000", "Hospitals", Some("Emergency and general enquiries")),
        LocalNumber::new("Heartlands Hospital", "0121 424 2000", "Hospitals", Some("Emergency and general enquiries")),
        LocalNumber::new("Good Hope Hospital", "0121 424 2000", "Hospitals", Some("Emergency and general enquiries")),
        LocalNumber::new("Birmingham Dental Hospital", "0121 466 5000", "Hospitals", Some("Emergency dental care")),
        LocalNumber::new("Birmingham Women's Hospital", "0121 472 1377", "Hospitals", Some("Emergency and general enquiries")),
        LocalNumber::new("Birmingham City Hospital", "0121 554 3801", "Hospitals", Some("Emergency and general enquiries")),

        // Primary Care
        LocalNumber::new("Birmingham GP Out of Hours", "111", "Primary Care", Some("NHS 111 service for urgent medical help")),
        LocalNumber::new("Birmingham Walk-in Centre", "0121 255 0700", "Primary Care", Some("Urgent care without appointment")),

        // Mental Health
        LocalNumber::new("Birmingham Mental Health Crisis", "0800 915 9292", "Mental Health", Some("24/7 mental health crisis support")),

        // Social Services
        LocalNumber::new("Birmingham Social Services", "0121 303 1234", "Social Services", Some("Adult social care services")),
        LocalNumber::new("Birmingham Children's Social Care", "0121 303 1888", "Social Services", Some("Children's social care services")),

        // Council Services
        LocalNumber::new("Birmingham City Council", "0121 303 9944", "Council Services", Some("General council enquiries")),

        // Housing
        LocalNumber::new("Birmingham Emergency Housing", "0121 303 7410", "Housing", Some("Emergency housing assistance")),

        // Support Services
        LocalNumber::new("Birmingham Drug & Alcohol Service", "0121 227 5890", "Support Services", Some("Substance misuse support")),
        LocalNumber::new("Birmingham Domestic Violence", "0808 2000 247", "Support Services", Some("24/7 domestic violence support")),
        LocalNumber::new("Birmingham Samaritans", "116 123", "Support Services", Some("24/7 emotional support")),
        LocalNumber::new("Birmingham Citizens Advice", "0800 144 8848", "Support Services", Some("Free, confidential advice")),
        LocalNumber::new("Birmingham Food Bank", "0121 766 7171", "Support Services", Some("Emergency food support")),
        LocalNumber::new("Birmingham Age UK", "0121 437 0033", "Support Services", Some("Support for older people")),

        // Primary Care
        LocalNumber::new("Single Point of Access (SPA) - Sandwell and West Birmingham", "0121 507 3301", "Primary Care", Some("Single point of access for community services")),

        // Mental Health
        LocalNumber::new("Single Point of Access (SPA) - Mental Health BSMHT", "0121 301 4000", "Mental Health", Some("Mental health single point of access")),

        // Primary Care
        LocalNumber::new("Urgent Community Response - Birmingham", "0300 555 1919", "Primary Care", Some("Urgent community response team")),
    ]
}

/// Load every built-in dataset. Safe to run on an already seeded store.
pub fn seed_database(db: &mut Database) -> DbResult<()> {
    db.import_items(TermKind::Medication, &common_medications())?;
    db.import_items(TermKind::Condition, &common_conditions())?;
    for entry in local_numbers() {
        db.upsert_local_number(&entry)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_medication_slugs_unique() {
        let meds = common_medications();
        let slugs: HashSet<_> = meds.iter().map(|m| m.search.as_str()).collect();
        assert_eq!(slugs.len(), meds.len());
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut db = Database::open_in_memory().unwrap();
        seed_database(&mut db).unwrap();
        seed_database(&mut db).unwrap();

        assert_eq!(
            db.count_terms(TermKind::Medication).unwrap(),
            common_medications().len()
        );
        assert_eq!(
            db.count_terms(TermKind::Condition).unwrap(),
            common_conditions().len()
        );
        assert_eq!(db.list_local_numbers(None).unwrap().len(), local_numbers().len());
    }

    #[test]
    fn test_seeded_categories() {
        let mut db = Database::open_in_memory().unwrap();
        seed_database(&mut db).unwrap();

        let categories = db.local_number_categories().unwrap();
        assert_eq!(categories[0], "Hospitals");
        assert!(categories.contains(&"Support Services".to_string()));
    }
}
