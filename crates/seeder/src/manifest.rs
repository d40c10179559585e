use serde::Deserialize;

/// Seed manifest: the whole tree to import, as one JSON document. The
/// import is re-runnable; entries that already exist are repaired in place.
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    pub colleges: Vec<SeedCollege>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCollege {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<SeedCourse>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCourse {
    pub name: String,
    pub code: Option<String>,
    #[serde(default)]
    pub semesters: Vec<SeedSemester>,
}

#[derive(Debug, Deserialize)]
pub struct SeedSemester {
    pub number: i32,
    pub name: Option<String>,
    #[serde(default)]
    pub subjects: Vec<SeedSubject>,
}

#[derive(Debug, Deserialize)]
pub struct SeedSubject {
    pub name: String,
    pub code: Option<String>,
    #[serde(default)]
    pub units: Vec<SeedUnit>,
}

#[derive(Debug, Deserialize)]
pub struct SeedUnit {
    pub number: i32,
    pub name: String,
    pub description: Option<String>,
    pub file: Option<SeedFile>,
}

/// Where a unit's document should live. A remote entry with `upload_from`
/// publishes the local file to the bucket before the key is recorded.
#[derive(Debug, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SeedFile {
    Local {
        path: String,
    },
    Remote {
        key: String,
        upload_from: Option<String>,
    },
}

#[cfg(test)]
mod test {
    use super::{SeedCatalog, SeedFile};

    #[test]
    fn test_manifest_parses() {
        let raw = r#"{
            "colleges": [{
                "name": "State Technical University",
                "courses": [{
                    "name": "BCA(General)",
                    "code": null,
                    "semesters": [{
                        "number": 6,
                        "name": null,
                        "subjects": [{
                            "name": "Databases",
                            "code": "BCG-302",
                            "units": [{
                                "number": 1,
                                "name": "Unit 1: Relational Model",
                                "description": null,
                                "file": {"backend": "remote", "key": "notes/db/u1.pdf", "upload_from": "uploads/db/u1.pdf"}
                            }, {
                                "number": 2,
                                "name": "Unit 2: SQL",
                                "description": null,
                                "file": {"backend": "local", "path": "db/u2.pdf"}
                            }]
                        }]
                    }]
                }]
            }]
        }"#;

        let catalog: SeedCatalog = serde_json::from_str(raw).unwrap();
        let units = &catalog.colleges[0].courses[0].semesters[0].subjects[0].units;
        assert_eq!(units.len(), 2);
        assert!(matches!(
            units[0].file,
            Some(SeedFile::Remote { ref key, .. }) if key == "notes/db/u1.pdf"
        ));
        assert!(matches!(
            units[1].file,
            Some(SeedFile::Local { ref path }) if path == "db/u2.pdf"
        ));
    }

    #[test]
    fn test_unit_without_file_is_allowed() {
        let raw = r#"{
            "colleges": [{
                "name": "X",
                "courses": [{
                    "name": "BCA",
                    "code": null,
                    "semesters": [{
                        "number": 1,
                        "name": null,
                        "subjects": [{
                            "name": "Maths",
                            "code": null,
                            "units": [{"number": 1, "name": "Unit 1", "description": null, "file": null}]
                        }]
                    }]
                }]
            }]
        }"#;

        let catalog: SeedCatalog = serde_json::from_str(raw).unwrap();
        assert!(
            catalog.colleges[0].courses[0].semesters[0].subjects[0].units[0]
                .file
                .is_none()
        );
    }
}
