//! Static job categories, roles and role skill descriptions

use crate::error::{Result, ScreenerError};

/// A job category and the roles filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCategory {
    pub name: &'static str,
    pub roles: &'static [&'static str],
}

const CATEGORIES: &[JobCategory] = &[
    JobCategory {
        name: "Software Development",
        roles: &["Frontend Developer", "Backend Developer", "Full Stack Developer"],
    },
    JobCategory {
        name: "Data & Analytics",
        roles: &["Data Scientist", "Data Analyst"],
    },
    JobCategory {
        name: "Cloud & DevOps",
        roles: &["DevOps Engineer", "Cloud Engineer"],
    },
];

const ROLE_SKILLS: &[(&str, &str)] = &[
    ("Frontend Developer", "HTML CSS JavaScript React UI UX"),
    ("Backend Developer", "Python Django Flask SQL APIs"),
    ("Full Stack Developer", "HTML CSS JS Node React Python SQL"),
    ("Data Scientist", "Python SQL Machine Learning Statistics Pandas Numpy"),
    ("DevOps Engineer", "AWS Docker Kubernetes Linux CI/CD"),
    ("Cloud Engineer", "AWS Azure GCP Terraform DevOps"),
];

/// Read-only catalog of roles, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy)]
pub struct JobCatalog {
    categories: &'static [JobCategory],
    role_skills: &'static [(&'static str, &'static str)],
}

impl Default for JobCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl JobCatalog {
    pub fn builtin() -> Self {
        Self {
            categories: CATEGORIES,
            role_skills: ROLE_SKILLS,
        }
    }

    pub fn categories(&self) -> &[JobCategory] {
        self.categories
    }

    pub fn category(&self, name: &str) -> Option<&JobCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn roles(&self, category: &str) -> Option<&'static [&'static str]> {
        self.category(category).map(|c| c.roles)
    }

    /// Skill description for a role; roles without one get an empty text.
    pub fn skill_text(&self, role: &str) -> &'static str {
        self.role_skills
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, skills)| *skills)
            .unwrap_or("")
    }

    /// Check that `role` is listed under `category`
    pub fn validate(&self, category: &str, role: &str) -> Result<()> {
        let roles = self.roles(category).ok_or_else(|| {
            ScreenerError::InvalidInput(format!(
                "Unknown job category: {}. Available: {}",
                category,
                self.categories.iter().map(|c| c.name).collect::<Vec<_>>().join(", ")
            ))
        })?;

        if roles.iter().any(|r| *r == role) {
            Ok(())
        } else {
            Err(ScreenerError::InvalidInput(format!(
                "Role '{}' is not part of '{}'. Available: {}",
                role,
                category,
                roles.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_keep_order() {
        let catalog = JobCatalog::builtin();
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Software Development", "Data & Analytics", "Cloud & DevOps"]);
        assert_eq!(
            catalog.roles("Cloud & DevOps").unwrap(),
            &["DevOps Engineer", "Cloud Engineer"]
        );
    }

    #[test]
    fn test_skill_text_lookup() {
        let catalog = JobCatalog::builtin();
        assert_eq!(catalog.skill_text("Backend Developer"), "Python Django Flask SQL APIs");
        // listed role without a description
        assert_eq!(catalog.skill_text("Data Analyst"), "");
        assert_eq!(catalog.skill_text("Astronaut"), "");
    }

    #[test]
    fn test_validate_role_membership() {
        let catalog = JobCatalog::builtin();
        assert!(catalog.validate("Data & Analytics", "Data Scientist").is_ok());
        assert!(matches!(
            catalog.validate("Data & Analytics", "Cloud Engineer"),
            Err(ScreenerError::InvalidInput(_))
        ));
        assert!(matches!(
            catalog.validate("Marketing", "Data Scientist"),
            Err(ScreenerError::InvalidInput(_))
        ));
    }
}
