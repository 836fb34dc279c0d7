use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HIGH_RISK_THRESHOLD: u32 = 8;
pub const MEDIUM_RISK_THRESHOLD: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Alto,
    Medio,
    Bajo,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= HIGH_RISK_THRESHOLD => RiskLevel::Alto,
            s if s >= MEDIUM_RISK_THRESHOLD => RiskLevel::Medio,
            _ => RiskLevel::Bajo,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Alto => "ALTO",
            RiskLevel::Medio => "MEDIO",
            RiskLevel::Bajo => "BAJO",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Alto => "danger",
            RiskLevel::Medio => "warning",
            RiskLevel::Bajo => "success",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RiskLevel::Alto => "🚨",
            RiskLevel::Medio => "⚠️",
            RiskLevel::Bajo => "✅",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Alto => "Muy probable que sea phishing",
            RiskLevel::Medio => "Posible intento de phishing",
            RiskLevel::Bajo => "El correo parece seguro",
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Alto => &[
                "NO hagas clic en ningún enlace del correo",
                "NO descargues archivos adjuntos",
                "NO proporciones información personal",
                "Elimina el correo inmediatamente",
                "Reporta el correo como spam/phishing",
            ],
            RiskLevel::Medio => &[
                "Verifica la dirección del remitente cuidadosamente",
                "No hagas clic en enlaces sospechosos",
                "Contacta directamente a la organización por teléfono",
                "Busca errores ortográficos o gramaticales",
                "Desconfía si pide información urgente",
            ],
            RiskLevel::Bajo => &[
                "El correo parece legítimo, pero mantén precaución",
                "Siempre verifica enlaces antes de hacer clic",
                "No compartas información sensible por correo",
                "Mantén actualizado tu antivirus",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALTO" => Ok(RiskLevel::Alto),
            "MEDIO" => Ok(RiskLevel::Medio),
            "BAJO" => Ok(RiskLevel::Bajo),
            other => Err(format!("Unknown risk level: {other}")),
        }
    }
}

/// Recommendations by tier name; unknown names get the BAJO list.
pub fn recommendations_for(level_name: &str) -> &'static [&'static str] {
    level_name
        .parse::<RiskLevel>()
        .unwrap_or(RiskLevel::Bajo)
        .recommendations()
}

/// CSS text class for a tier name.
pub fn severity_css_class(level_name: &str) -> &'static str {
    match level_name.parse::<RiskLevel>() {
        Ok(RiskLevel::Alto) => "text-danger",
        Ok(RiskLevel::Medio) => "text-warning",
        Ok(RiskLevel::Bajo) => "text-success",
        Err(_) => "text-secondary",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub total_score: u32,
}

pub struct RiskAggregator;

impl RiskAggregator {
    pub fn aggregate(keyword_score: u32, url_score: u32) -> RiskAssessment {
        let total_score = keyword_score + url_score;
        let level = RiskLevel::from_score(total_score);

        RiskAssessment {
            level,
            color: level.color(),
            icon: level.icon(),
            description: level.description(),
            total_score,
        }
    }
}
