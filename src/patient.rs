//! Patient record fields and the notification template.

use clap::Args;

/// Patient record as handed over by the records backend, one positional
/// argument per field.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PatientRecord {
    /// Patient record ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Gender
    pub gender: String,
    /// Date of birth
    pub date_of_birth: String,
    /// Local 10-digit phone number
    pub phone_number: String,
    /// Blood type
    pub blood_type: String,
    /// Medical conditions (comma-separated)
    pub medical_conditions: String,
    /// Medications (comma-separated)
    pub medications: String,
    /// Allergies (comma-separated)
    pub allergies: String,
    /// Free-form notes
    pub notes: String,
    /// Registration date
    pub registration_date: String,
    /// Last visit date
    pub last_visit: String,
    /// What happened to the record (e.g. created, updated)
    pub action: String,
}

impl PatientRecord {
    /// Format the WhatsApp message body for this record.
    ///
    /// The body opens with a newline, every text line is indented by four
    /// spaces and the closing line is followed by a newline plus indent.
    pub fn render_message(&self, clinic_name: &str) -> String {
        format!(
            "
    Hello {name}, your patient record has been {action} ❤️‍🩹.

    Personal Details:
    ID: {id} 🪪
    Name: {name} 🔤
    Phone Number: {phone} 📞
    Gender: {gender} 🚻
    Date of Birth: {dob} 🎂

    Medical Details:
    Blood Type: {blood} 🩸
    Medical Conditions: {conditions} 🩺
    Medications: {medications} 💊
    Allergies: {allergies} 🌼

    Notes: {notes} 📝
    Registration Date: {registered} 📅
    Last Visit: {last_visit} 🩹

    If you have any questions, please contact us at {clinic} 💙.
    ThankYou :)
    ",
            name = self.name,
            action = self.action,
            id = self.id,
            phone = self.phone_number,
            gender = self.gender,
            dob = self.date_of_birth,
            blood = self.blood_type,
            conditions = self.medical_conditions,
            medications = self.medications,
            allergies = self.allergies,
            notes = self.notes,
            registered = self.registration_date,
            last_visit = self.last_visit,
            clinic = clinic_name,
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> PatientRecord {
    PatientRecord {
        id: "P1".into(),
        name: "Asha".into(),
        gender: "F".into(),
        date_of_birth: "1990-01-01".into(),
        phone_number: "9876543210".into(),
        blood_type: "O+".into(),
        medical_conditions: "None".into(),
        medications: "None".into(),
        allergies: "None".into(),
        notes: "OK".into(),
        registration_date: "2024-01-01".into(),
        last_visit: "2024-06-01".into(),
        action: "updated".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_message_contains_greeting_id_and_action() {
        let body = sample_record().render_message("Radiant Care");

        assert!(body.contains("Hello Asha"));
        assert!(body.contains("ID: P1"));
        assert!(body.contains("updated"));
    }

    #[test]
    fn body_keeps_leading_newline_and_indentation() {
        let body = sample_record().render_message("Radiant Care");

        assert!(body.starts_with("\n    Hello Asha, your patient record has been updated ❤️‍🩹.\n\n"));
        assert!(body.ends_with("\n    ThankYou :)\n    "));
        assert!(body
            .lines()
            .all(|l| l.is_empty() || l.starts_with("    ")));
    }

    #[test]
    fn every_field_is_interpolated() {
        let body = sample_record().render_message("Radiant Care");

        for line in [
            "Phone Number: 9876543210 📞",
            "Gender: F 🚻",
            "Date of Birth: 1990-01-01 🎂",
            "Blood Type: O+ 🩸",
            "Medical Conditions: None 🩺",
            "Medications: None 💊",
            "Allergies: None 🌼",
            "Notes: OK 📝",
            "Registration Date: 2024-01-01 📅",
            "Last Visit: 2024-06-01 🩹",
        ] {
            let indented = format!("    {}", line);
            assert!(body.lines().any(|l| l == indented), "missing line {line:?}");
        }
    }

    #[test]
    fn clinic_name_appears_in_signature() {
        let body = sample_record().render_message("Sunrise Clinic");
        assert!(body.contains("please contact us at Sunrise Clinic 💙."));
    }

    #[test]
    fn empty_fields_are_kept_verbatim() {
        let mut record = sample_record();
        record.notes.clear();
        record.last_visit.clear();

        let body = record.render_message("Radiant Care");
        assert!(body.contains("Notes:  📝"));
        assert!(body.contains("Last Visit:  🩹"));
    }
}
