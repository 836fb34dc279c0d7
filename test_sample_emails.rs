#![allow(clippy::uninlined_format_args)]

use phishing_detector::report::format_analysis_report;
use phishing_detector::PhishingDetector;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Running sample emails through the built-in keyword set...");
    println!();

    let samples = [
        (
            "Bank lockout",
            "URGENTE: Su cuenta será suspendida en 24 horas.\n\
             Para evitar consecuencias legales debe confirmar su contraseña y el PIN\n\
             de su tarjeta de crédito aquí: http://bit.ly/banco-seguro",
        ),
        (
            "Lottery prize",
            "¡Felicidades! Usted es el ganador de nuestra lotería.\n\
             Reclame su premio visitando www.premio-ganador-oficial.com",
        ),
        (
            "Raw IP login",
            "Verifica tu cuenta ahora mismo o será bloqueada. http://192.168.1.1/login",
        ),
        (
            "Team lunch",
            "Hola equipo, el almuerzo del viernes será a las 13:00 en la cafetería.",
        ),
    ];

    let detector = PhishingDetector::default();

    for (name, body) in &samples {
        let result = detector.analyze_email(body)?;
        println!("── {} ──", name);
        println!("{}", format_analysis_report(&result));
        println!();
    }

    Ok(())
}
