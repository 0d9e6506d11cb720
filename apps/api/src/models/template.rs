//! Starter document copied into every newly created record.

use crate::models::document::{
    Contact, CourseItem, Document, EducationItem, ExperienceItem, LanguageItem, LanguageLevel,
};
use crate::models::rich_text::RichText;

impl Document {
    /// A fresh, fully owned copy of the starter résumé.
    pub fn template() -> Document {
        Document {
            name: RichText::plain("Tu Nombre Completo"),
            title: RichText::plain("Profesión | Área de especialidad"),
            summary: RichText::from_markup(
                "Profesional <b>proactivo</b> y orientado a resultados. Describe aquí en dos o \
                 tres frases tu experiencia, tus fortalezas y el tipo de puesto que buscas.",
            ),
            contact: Contact {
                email: "correo@ejemplo.com".to_string(),
                phone: "+00 000 000 0000".to_string(),
                location: "Ciudad, País".to_string(),
                ..Contact::default()
            },
            education: vec![EducationItem {
                degree: "Título obtenido".to_string(),
                institution: "Institución educativa".to_string(),
                period: "09/2016 - 06/2020".to_string(),
                location: "Ciudad, País".to_string(),
            }],
            experience: vec![ExperienceItem {
                role: "Cargo".to_string(),
                company: "Empresa".to_string(),
                period: "01/2021 - Actualidad".to_string(),
                location: "Ciudad".to_string(),
                tasks: vec![
                    "Logro principal con un resultado medible.".to_string(),
                    "Responsabilidad clave del puesto.".to_string(),
                ],
            }],
            courses: vec![CourseItem {
                title: "Nombre del curso".to_string(),
                date: "05/2024 - 05/2024".to_string(),
                provider: "Plataforma o institución".to_string(),
            }],
            languages: vec![
                LanguageItem::new("Español", LanguageLevel::Nativo),
                LanguageItem::new("Inglés", LanguageLevel::Intermedio),
            ],
            skills: vec![
                "Trabajo en equipo".to_string(),
                "Comunicación efectiva".to_string(),
                "Microsoft Office".to_string(),
            ],
            interests: vec!["Aprendizaje continuo".to_string()],
            ..Document::default()
        }
    }
}
