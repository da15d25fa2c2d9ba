use crate::extract::java::JavaExtractor;
use crate::extract::kotlin::KotlinExtractor;
use crate::extract::python::PythonExtractor;
use crate::extract::Extractor;
use crate::walk::Language;

/// Create an Extractor for a given language.
pub fn create_extractor(lang: Language) -> Box<dyn Extractor> {
    match lang {
        Language::Python => Box::new(PythonExtractor::new()),
        Language::Java => Box::new(JavaExtractor::new()),
        Language::Kotlin => Box::new(KotlinExtractor::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_an_extractor() {
        for lang in [Language::Python, Language::Java, Language::Kotlin] {
            let _ = create_extractor(lang).language();
        }
    }
}
