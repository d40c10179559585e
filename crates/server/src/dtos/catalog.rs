use database::entities::{college, course, semester, subject, unit};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CollegeResponse {
    pub id: String,
    pub name: String,
}

impl From<college::Model> for CollegeResponse {
    fn from(model: college::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub college_id: String,
    pub name: String,
    pub code: Option<String>,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id,
            college_id: model.college_id,
            name: model.name,
            code: model.code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SemesterResponse {
    pub id: String,
    pub college_id: String,
    pub course_id: Option<String>,
    pub number: i32,
    pub name: String,
}

impl From<semester::Model> for SemesterResponse {
    fn from(model: semester::Model) -> Self {
        Self {
            id: model.id,
            college_id: model.college_id,
            course_id: model.course_id,
            number: model.number,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: String,
    pub semester_id: String,
    pub name: String,
    pub code: Option<String>,
}

impl From<subject::Model> for SubjectResponse {
    fn from(model: subject::Model) -> Self {
        Self {
            id: model.id,
            semester_id: model.semester_id,
            name: model.name,
            code: model.code,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnitResponse {
    pub id: String,
    pub subject_id: String,
    pub name: String,
    pub number: i32,
    pub description: Option<String>,
    /// Whether a document has been published for this unit. The reference
    /// itself stays server-side; clients fetch bytes through the document
    /// endpoint.
    pub has_document: bool,
}

impl From<unit::Model> for UnitResponse {
    fn from(model: unit::Model) -> Self {
        let has_document = model.backend.is_some() && model.file_ref.is_some();
        Self {
            id: model.id,
            subject_id: model.subject_id,
            name: model.name,
            number: model.number,
            description: model.description,
            has_document,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectCollegeResponse {
    pub message: String,
    pub subject: String,
    pub college_id: Option<String>,
}

/// Time-limited link to a remotely stored document. Handed out for one
/// immediate render; a fresh link is signed on every request.
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentLinkResponse {
    pub url: String,
    pub expires_at: String,
}

#[cfg(test)]
mod test {
    use super::UnitResponse;
    use chrono::NaiveDate;
    use database::entities::unit;

    #[test]
    fn test_unit_response_hides_the_file_reference() {
        let stamp = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let model = unit::Model {
            id: "unit-1".to_owned(),
            subject_id: "subj-1".to_owned(),
            name: "Unit 1: Introduction".to_owned(),
            number: 1,
            backend: Some("remote".to_owned()),
            file_ref: Some("notes/db/u1.pdf".to_owned()),
            description: None,
            created_at: stamp,
            updated_at: stamp,
        };

        let dto = UnitResponse::from(model);
        assert!(dto.has_document);

        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("notes/db/u1.pdf"));
    }

    #[test]
    fn test_unit_without_document_says_so() {
        let stamp = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let model = unit::Model {
            id: "unit-2".to_owned(),
            subject_id: "subj-1".to_owned(),
            name: "Unit 2: Advanced Topics".to_owned(),
            number: 2,
            backend: None,
            file_ref: None,
            description: None,
            created_at: stamp,
            updated_at: stamp,
        };

        assert!(!UnitResponse::from(model).has_document);
    }
}
