use once_cell::sync::Lazy;
use serde::Serialize;

/// Per-specialty inputs to the revenue loss estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryCoefficients {
    pub avg_appt_value: f64,
    pub after_hours_rate: f64,
    pub weekly_after_hours_calls: f64,
    pub hold_abandon_rate: f64,
    pub no_show_rate: f64,
    pub no_show_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specialty {
    Dental,
    PrimaryCare,
    Orthopedics,
    Cardiology,
    Dermatology,
    Ophthalmology,
    Other,
}

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::Dental,
        Specialty::PrimaryCare,
        Specialty::Orthopedics,
        Specialty::Cardiology,
        Specialty::Dermatology,
        Specialty::Ophthalmology,
        Specialty::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Specialty::Dental => "Dental",
            Specialty::PrimaryCare => "Primary Care",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Cardiology => "Cardiology",
            Specialty::Dermatology => "Dermatology",
            Specialty::Ophthalmology => "Ophthalmology",
            Specialty::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn coefficients(self) -> CategoryCoefficients {
        match self {
            Specialty::Dental => CategoryCoefficients {
                avg_appt_value: 200.0,
                after_hours_rate: 0.25,
                weekly_after_hours_calls: 15.0,
                hold_abandon_rate: 0.167,
                no_show_rate: 0.22,
                no_show_multiplier: 1.2,
            },
            Specialty::PrimaryCare => CategoryCoefficients {
                avg_appt_value: 175.0,
                after_hours_rate: 0.2,
                weekly_after_hours_calls: 12.0,
                hold_abandon_rate: 0.18,
                no_show_rate: 0.2,
                no_show_multiplier: 1.0,
            },
            Specialty::Orthopedics => CategoryCoefficients {
                avg_appt_value: 350.0,
                after_hours_rate: 0.3,
                weekly_after_hours_calls: 18.0,
                hold_abandon_rate: 0.15,
                no_show_rate: 0.18,
                no_show_multiplier: 1.5,
            },
            Specialty::Cardiology => CategoryCoefficients {
                avg_appt_value: 400.0,
                after_hours_rate: 0.28,
                weekly_after_hours_calls: 16.0,
                hold_abandon_rate: 0.14,
                no_show_rate: 0.16,
                no_show_multiplier: 1.6,
            },
            Specialty::Dermatology => CategoryCoefficients {
                avg_appt_value: 225.0,
                after_hours_rate: 0.22,
                weekly_after_hours_calls: 14.0,
                hold_abandon_rate: 0.17,
                no_show_rate: 0.19,
                no_show_multiplier: 1.1,
            },
            Specialty::Ophthalmology => CategoryCoefficients {
                avg_appt_value: 275.0,
                after_hours_rate: 0.24,
                weekly_after_hours_calls: 13.0,
                hold_abandon_rate: 0.16,
                no_show_rate: 0.17,
                no_show_multiplier: 1.3,
            },
            Specialty::Other => CategoryCoefficients {
                avg_appt_value: 225.0,
                after_hours_rate: 0.22,
                weekly_after_hours_calls: 13.0,
                hold_abandon_rate: 0.17,
                no_show_rate: 0.21,
                no_show_multiplier: 1.1,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTitle {
    Ciso,
    ChiefComplianceOfficer,
    Cio,
    VpRiskCompliance,
    VpInformationSecurity,
    Other,
}

impl JobTitle {
    pub const ALL: [JobTitle; 6] = [
        JobTitle::Ciso,
        JobTitle::ChiefComplianceOfficer,
        JobTitle::Cio,
        JobTitle::VpRiskCompliance,
        JobTitle::VpInformationSecurity,
        JobTitle::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobTitle::Ciso => "CISO",
            JobTitle::ChiefComplianceOfficer => "Chief Compliance Officer",
            JobTitle::Cio => "CIO",
            JobTitle::VpRiskCompliance => "VP Risk & Compliance",
            JobTitle::VpInformationSecurity => "VP Information Security",
            JobTitle::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn points(self) -> u32 {
        match self {
            JobTitle::Ciso | JobTitle::ChiefComplianceOfficer => 20,
            JobTitle::Cio | JobTitle::VpRiskCompliance => 15,
            JobTitle::VpInformationSecurity => 18,
            JobTitle::Other => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationSize {
    LessThan50,
    From50To500,
    From500To5000,
    Over5000,
}

impl OrganizationSize {
    pub const ALL: [OrganizationSize; 4] = [
        OrganizationSize::LessThan50,
        OrganizationSize::From50To500,
        OrganizationSize::From500To5000,
        OrganizationSize::Over5000,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrganizationSize::LessThan50 => "Less than 50",
            OrganizationSize::From50To500 => "50-500",
            OrganizationSize::From500To5000 => "500-5000",
            OrganizationSize::Over5000 => "5000+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn points(self) -> u32 {
        match self {
            OrganizationSize::LessThan50 => 5,
            OrganizationSize::From50To500 => 10,
            OrganizationSize::From500To5000 => 15,
            OrganizationSize::Over5000 => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiUsage {
    Yes,
    No,
    NotSure,
}

impl AiUsage {
    pub const ALL: [AiUsage; 3] = [AiUsage::Yes, AiUsage::No, AiUsage::NotSure];

    pub fn label(self) -> &'static str {
        match self {
            AiUsage::Yes => "Yes",
            AiUsage::No => "No",
            AiUsage::NotSure => "Not Sure",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }

    pub fn points(self) -> u32 {
        match self {
            AiUsage::Yes => 20,
            AiUsage::No => 5,
            AiUsage::NotSure => 10,
        }
    }
}

/// Industry is collected for the lead but carries no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    HealthcareProvider,
    HealthSystem,
    PayerInsurance,
    MedicalDevice,
    OtherHealthcare,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::HealthcareProvider,
        Industry::HealthSystem,
        Industry::PayerInsurance,
        Industry::MedicalDevice,
        Industry::OtherHealthcare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::HealthcareProvider => "Healthcare Provider",
            Industry::HealthSystem => "Health System",
            Industry::PayerInsurance => "Payer/Insurance",
            Industry::MedicalDevice => "Medical Device",
            Industry::OtherHealthcare => "Other Healthcare",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub specialties: Vec<&'static str>,
    pub job_titles: Vec<&'static str>,
    pub organization_sizes: Vec<&'static str>,
    pub industries: Vec<&'static str>,
    #[serde(rename = "currentlyUsingAI")]
    pub currently_using_ai: Vec<&'static str>,
}

pub static FORM_OPTIONS: Lazy<FormOptions> = Lazy::new(|| FormOptions {
    specialties: Specialty::ALL.iter().map(|s| s.label()).collect(),
    job_titles: JobTitle::ALL.iter().map(|t| t.label()).collect(),
    organization_sizes: OrganizationSize::ALL.iter().map(|s| s.label()).collect(),
    industries: Industry::ALL.iter().map(|i| i.label()).collect(),
    currently_using_ai: AiUsage::ALL.iter().map(|u| u.label()).collect(),
});
