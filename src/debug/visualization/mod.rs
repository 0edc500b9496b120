// Ausgabe der erzeugten Striche zur Begutachtung
pub mod svg;

pub use self::svg::SvgSink;
