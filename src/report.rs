use crate::detector::AnalysisResult;

/// Plain-text report for terminal output.
pub fn format_analysis_report(result: &AnalysisResult) -> String {
    let mut lines = vec![
        "=== REPORTE DE ANÁLISIS DE PHISHING ===".to_string(),
        format!("Nivel de Riesgo: {}", result.risk_level),
        format!("Puntuación: {} puntos", result.total_score),
        String::new(),
    ];

    if !result.detected_keywords.is_empty() {
        lines.push("Palabras clave detectadas:".to_string());
        for keyword in &result.detected_keywords {
            lines.push(format!("  - {keyword}"));
        }
        lines.push(String::new());
    }

    if !result.suspicious_urls.is_empty() {
        lines.push("URLs sospechosas:".to_string());
        for url in &result.suspicious_urls {
            lines.push(format!("  - {url}"));
        }
        lines.push(String::new());
    }

    lines.push("Recomendaciones:".to_string());
    for recommendation in &result.recommendations {
        lines.push(format!("  • {recommendation}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::PhishingDetector;

    #[test]
    fn test_report_sections() {
        let detector = PhishingDetector::default();
        let result = detector
            .analyze_email("Ganaste un premio, entra a http://bit.ly/x")
            .unwrap();
        let report = format_analysis_report(&result);

        assert!(report.starts_with("=== REPORTE DE ANÁLISIS DE PHISHING ===\n"));
        assert!(report.contains("Nivel de Riesgo: MEDIO"));
        assert!(report.contains("Puntuación: 6 puntos"));
        assert!(report.contains("Palabras clave detectadas:\n  - premio (dinero)\n"));
        assert!(report.contains("URLs sospechosas:\n  - http://bit.ly/x\n  - bit.ly\n"));
        assert!(report.ends_with("  • Desconfía si pide información urgente"));
    }

    #[test]
    fn test_clean_report_omits_empty_sections() {
        let detector = PhishingDetector::default();
        let result = detector.analyze_email("Nos vemos mañana en la oficina").unwrap();
        let report = format_analysis_report(&result);

        assert!(!report.contains("Palabras clave detectadas:"));
        assert!(!report.contains("URLs sospechosas:"));
        assert_eq!(report.matches("  • ").count(), 4);
    }
}
