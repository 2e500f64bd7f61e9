//! Static catalog of HR knowledge domains.
//!
//! Each domain pairs a text-extractable PDF with an optional JSON fact
//! sheet under the knowledge base directory, plus a fixed set of
//! suggested questions shown before the first exchange. The catalog is
//! built once at startup and never mutated.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DomainSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub pdf_file: &'static str,
    pub json_file: &'static str,
    pub suggested_questions: [&'static str; 6],
}

#[derive(Debug, Clone)]
pub struct DomainCatalog {
    domains: Vec<DomainSpec>,
}

impl DomainCatalog {
    pub fn new() -> Self {
        Self {
            domains: builtin_domains(),
        }
    }

    pub fn all(&self) -> &[DomainSpec] {
        &self.domains
    }

    pub fn get(&self, slug: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.slug == slug)
    }
}

impl Default for DomainCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_domains() -> Vec<DomainSpec> {
    vec![
        DomainSpec {
            slug: "compensation-performance",
            title: "Compensation & Performance",
            icon: "💰",
            description: "Salary, performance reviews, and career growth",
            pdf_file: "compensation_performance.pdf",
            json_file: "compensation_performance.json",
            suggested_questions: [
                "What is the annual performance review cycle timeline?",
                "How is my annual salary increment calculated?",
                "What are the different performance ratings and what do they mean?",
                "When are annual bonuses paid out?",
                "How do I raise a dispute about my performance rating?",
                "What is the promotion nomination process?",
            ],
        },
        DomainSpec {
            slug: "onboarding",
            title: "Onboarding Assistant",
            icon: "🚀",
            description: "Welcome guide for new employees",
            pdf_file: "onboarding_assistant.pdf",
            json_file: "onboarding_assistant.json",
            suggested_questions: [
                "Where do I need to upload my official documents?",
                "How do I set up my company email and communication tools?",
                "When is the new hire orientation session?",
                "Who is my assigned onboarding buddy?",
                "How do I request my laptop and access badge?",
                "What trainings are mandatory in my first month?",
            ],
        },
        DomainSpec {
            slug: "company-policies",
            title: "Company Policies",
            icon: "📋",
            description: "Work policies, leave, and guidelines",
            pdf_file: "company_policies.pdf",
            json_file: "company_policies.json",
            suggested_questions: [
                "How many days of paid leave can I take per year?",
                "What is the process for travel expense reimbursement?",
                "What is the company's work-from-home policy?",
                "How do I apply for parental leave?",
                "What is the dress code policy?",
                "How are public holidays decided each year?",
            ],
        },
        DomainSpec {
            slug: "offboarding-exit",
            title: "Offboarding & Exit Process",
            icon: "👋",
            description: "Exit procedures and final settlements",
            pdf_file: "offboarding_exit.pdf",
            json_file: "offboarding_exit.json",
            suggested_questions: [
                "When will I receive my final settlement and payslip?",
                "What is the clearance process I need to follow?",
                "How do I apply for my experience and relieving letters?",
                "What is the notice period for my role?",
                "When do I need to return company assets?",
                "How is unused leave treated in the final settlement?",
            ],
        },
        DomainSpec {
            slug: "benefits-eligibility",
            title: "Benefits & Eligibility",
            icon: "🏥",
            description: "Healthcare, insurance, and employee benefits",
            pdf_file: "benefits_eligibility.pdf",
            json_file: "benefits_eligibility.json",
            suggested_questions: [
                "What are the health insurance plans available to me?",
                "How do I enroll my family members in my health plan?",
                "Can I change my benefit selections mid-year?",
                "What wellness programs does the company offer?",
                "Is there a vision and dental coverage option?",
                "How do I claim insurance for a planned hospitalization?",
            ],
        },
        DomainSpec {
            slug: "payroll-compliance",
            title: "Payroll & Compliance",
            icon: "📊",
            description: "Payroll, taxes, and compliance matters",
            pdf_file: "payroll_compliance.pdf",
            json_file: "payroll_compliance.json",
            suggested_questions: [
                "When is the deadline to submit investment proofs for tax savings?",
                "How is my Provident Fund (PF) contribution calculated?",
                "Where can I download my monthly payslips and annual Form 16?",
                "What salary components are taxable?",
                "How do I update my bank account for salary credit?",
                "On which date is salary credited every month?",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_domains() {
        let catalog = DomainCatalog::new();
        assert_eq!(catalog.all().len(), 6);
    }

    #[test]
    fn slugs_are_unique_and_resolvable() {
        let catalog = DomainCatalog::new();
        for domain in catalog.all() {
            let found = catalog.get(domain.slug).expect("slug should resolve");
            assert_eq!(found.title, domain.title);
        }
        assert!(catalog.get("unknown-domain").is_none());
    }
}
