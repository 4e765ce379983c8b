//! In-memory GPX documents and zip archives for tests

use gpx::{Gpx, Metadata, Track, TrackSegment, Waypoint};
use std::io::{Cursor, Write};

pub(crate) fn create_test_waypoint(lat: f64, lon: f64) -> Waypoint {
    Waypoint::new(geo::Point::new(lon, lat))
}

/// One track, one segment, with a metadata name
pub(crate) fn create_test_gpx(name: &str, points: &[(f64, f64)]) -> Gpx {
    let mut gpx = Gpx::default();
    let mut metadata = Metadata::default();
    metadata.name = Some(name.to_string());
    gpx.metadata = Some(metadata);

    let mut track = Track::default();
    let mut segment = TrackSegment::default();
    for &(lat, lon) in points {
        segment.points.push(create_test_waypoint(lat, lon));
    }
    track.segments.push(segment);
    gpx.tracks.push(track);
    gpx
}

/// GPX 1.1 text with arbitrary tracks, each a list of segments of (lat, lon) points
pub(crate) fn gpx_document_with_tracks(name: &str, tracks: &[&[&[(f64, f64)]]]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"routedb-tests\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
    );
    doc.push_str(&format!("  <metadata><name>{name}</name></metadata>\n"));
    for segments in tracks {
        doc.push_str("  <trk>\n");
        for points in *segments {
            doc.push_str("    <trkseg>\n");
            for (lat, lon) in *points {
                doc.push_str(&format!("      <trkpt lat=\"{lat}\" lon=\"{lon}\"></trkpt>\n"));
            }
            doc.push_str("    </trkseg>\n");
        }
        doc.push_str("  </trk>\n");
    }
    doc.push_str("</gpx>\n");
    doc
}

/// GPX 1.1 text with one track holding one segment
pub(crate) fn gpx_document(name: &str, points: &[(f64, f64)]) -> String {
    gpx_document_with_tracks(name, &[&[points]])
}

/// Zip archive with the given (file name, contents) entries, in order
pub(crate) fn create_test_archive(entries: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Two routes in Osh whose overall bounds are
/// N=40.5432, S=40.501026, E=72.822586, W=72.796295
pub(crate) fn fixture_archive() -> Vec<u8> {
    create_test_archive(&[
        (
            "kg-osh-101.gpx",
            gpx_document(
                "kg-osh-101",
                &[
                    (40.50263, 72.821976),
                    (40.501026, 72.82),
                    (40.505, 72.815),
                    (40.52, 72.81),
                    (40.5432, 72.805),
                ],
            ),
        ),
        (
            "kg-osh-5-express.gpx",
            gpx_document(
                "kg-osh-5-express",
                &[(40.53, 72.796295), (40.51, 72.822586), (40.515, 72.8)],
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpx_document_parses() {
        let doc = gpx_document("kg-osh-1", &[(1.5, 2.25)]);
        let gpx = gpx::read(doc.as_bytes()).unwrap();

        assert_eq!(gpx.tracks.len(), 1);
        assert_eq!(gpx.tracks[0].segments.len(), 1);
        let point = gpx.tracks[0].segments[0].points[0].point();
        assert_eq!((point.y(), point.x()), (1.5, 2.25));
        assert_eq!(
            gpx.metadata.and_then(|m| m.name),
            Some("kg-osh-1".to_string())
        );
    }
}
