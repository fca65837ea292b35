use serde::{Deserialize, Serialize};

/// Language used for every applicant- and admin-facing literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Georgian,
}

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "ka" | "ge" | "georgian" => Some(Self::Georgian),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Georgian => "ka",
        }
    }

    /// Header row of the applications CSV export.
    pub const fn export_headers(self) -> [&'static str; 5] {
        match self {
            Self::English => ["Name", "Email", "Vacancy", "Date", "Resume URL"],
            Self::Georgian => ["სახელი", "ელფოსტა", "ვაკანსია", "თარიღი", "რეზიუმე URL"],
        }
    }
}

/// Keys for the fixed message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    NameRequired,
    NameTooShort,
    EmailRequired,
    EmailInvalid,
    PhoneRequired,
    PhoneTooShort,
    PhoneInvalid,
    ResumeRequired,
    ResumeNotPdf,
    ResumeTooLarge,
    MissingRequiredFields,
    UploadResume,
    PdfOnly,
    FileTooLarge,
    UploadFailed,
    SaveFailed,
    Unexpected,
    Submitted,
}

impl Message {
    pub const fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.english(),
            Locale::Georgian => self.georgian(),
        }
    }

    const fn english(self) -> &'static str {
        match self {
            Self::NameRequired => "Full name is required",
            Self::NameTooShort => "Name must be at least 2 characters long",
            Self::EmailRequired => "Email is required",
            Self::EmailInvalid => "Invalid email format",
            Self::PhoneRequired => "Phone number is required",
            Self::PhoneTooShort => "Phone number must be at least 9 characters long",
            Self::PhoneInvalid => "Invalid phone number format",
            Self::ResumeRequired => "Uploading a CV is required",
            Self::ResumeNotPdf => "Only PDF files are allowed",
            Self::ResumeTooLarge => "File size must not exceed 10MB",
            Self::MissingRequiredFields => "Please fill in all required fields.",
            Self::UploadResume => "Please upload your PDF résumé.",
            Self::PdfOnly => "Only a PDF file can be uploaded.",
            Self::FileTooLarge => "The file must be smaller than 10MB.",
            Self::UploadFailed => "There was a problem uploading your file.",
            Self::SaveFailed => "We could not save your application.",
            Self::Unexpected => "Something unexpected happened, please try again later.",
            Self::Submitted => "Thank you for applying. We will get back to you soon.",
        }
    }

    const fn georgian(self) -> &'static str {
        match self {
            Self::NameRequired => "სახელი და გვარი სავალდებულოა",
            Self::NameTooShort => "სახელი უნდა შედგებოდეს მინიმუმ 2 სიმბოლოსგან",
            Self::EmailRequired => "ელფოსტა სავალდებულოა",
            Self::EmailInvalid => "არასწორი ელფოსტის ფორმატი",
            Self::PhoneRequired => "ტელეფონი სავალდებულოა",
            Self::PhoneTooShort => "ტელეფონი უნდა შედგებოდეს მინიმუმ 9 სიმბოლოსგან",
            Self::PhoneInvalid => "არასწორი ტელეფონის ფორმატი",
            Self::ResumeRequired => "CV-ის ატვირთვა სავალდებულოა",
            Self::ResumeNotPdf => "მხოლოდ PDF ფაილები დაშვებულია",
            Self::ResumeTooLarge => "ფაილის ზომა არ უნდა აღემატებოდეს 10MB-ს",
            Self::MissingRequiredFields => "შეავსე ყველა აუცილებელი ველი.",
            Self::UploadResume => "ატვირთე შენი PDF რეზიუმე.",
            Self::PdfOnly => "სულ PDF ფაილი შეიძლება.",
            Self::FileTooLarge => "ფაილი 10MB-ს უნდა ჩამოსცდეს.",
            Self::UploadFailed => "ფაილის ატვირთვისას პრობლემა შეგვექმნა.",
            Self::SaveFailed => "განაცხადის შენახვა ვერ მოხერხდა.",
            Self::Unexpected => "რაღაც გაუთვალისწინებელი მოხდა, სცადე მოგვიანებით.",
            Self::Submitted => "მადლობა განაცხადისთვის, მალე გამოგეხმაურებით.",
        }
    }
}
