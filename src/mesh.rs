//! Triangle meshes and the Wavefront OBJ loader.
//!
//! Only the subset needed for flat-shaded geometry is read: `v` lines and `f`
//! lines. Every other line (normals, texture coordinates, groups, materials,
//! comments) is skipped.
//!
//! Mesh boundaries come from the order of lines, not from `o`/`g` records: a
//! new mesh starts at the first `v` line and at every `v` line that follows an
//! `f` line. Face indices stay 1-based as in the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::LoadError;
use crate::math::Vec3;

/// Vertex positions plus triangulated, 1-based face indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<u32>,
}

impl Mesh {
    /// Creates a mesh from vertices and 1-based triangle indices.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<u32>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle indices, three per face, 1-based.
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_index_count(&self) -> usize {
        self.faces.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Vertex positions of each triangle.
    ///
    /// Triangles that reference a missing vertex are skipped. Loaded meshes
    /// never contain any.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.faces.chunks_exact(3).filter_map(|face| {
            let vertex = |index: u32| {
                (index as usize)
                    .checked_sub(1)
                    .and_then(|i| self.vertices.get(i))
                    .copied()
            };
            Some([vertex(face[0])?, vertex(face[1])?, vertex(face[2])?])
        })
    }

    fn validate(&self, mesh: usize) -> Result<(), LoadError> {
        let vertex_count = self.vertices.len();
        match self
            .faces
            .iter()
            .find(|&&index| index == 0 || index as usize > vertex_count)
        {
            Some(&index) => Err(LoadError::FaceIndexOutOfRange {
                mesh,
                index: index as i64,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

/// Loads every mesh in a model file.
///
/// The format is picked by extension: `.obj` (any case) is parsed, a path
/// without an extension is an error, and any other extension yields no meshes.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Mesh>, LoadError> {
    let path = path.as_ref();
    let Some(extension) = path.extension() else {
        return Err(LoadError::UnrecognizedFormat {
            path: path.to_path_buf(),
        });
    };

    if !extension.to_string_lossy().eq_ignore_ascii_case("obj") {
        warn!(
            "Unsupported model format {:?} for {}, nothing loaded",
            extension,
            path.display()
        );
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let meshes = parse_obj(BufReader::new(file))?;

    debug!(
        "Loaded {} mesh(es), {} vertices, {} triangles from {}",
        meshes.len(),
        meshes.iter().map(Mesh::vertex_count).sum::<usize>(),
        meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
        path.display()
    );
    Ok(meshes)
}

/// Parses OBJ text from any buffered reader.
pub fn parse_obj(reader: impl BufRead) -> Result<Vec<Mesh>, LoadError> {
    let mut meshes: Vec<Mesh> = Vec::new();
    let mut after_face = true;

    // Lines are split on raw bytes so text in skipped records may use any encoding.
    for (number, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(LoadError::Read)?;
        let line = String::from_utf8_lossy(&line);
        let number = number + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                if after_face {
                    meshes.push(Mesh::default());
                    after_face = false;
                }
                let vertex = parse_vertex(tokens, number)?;
                if let Some(mesh) = meshes.last_mut() {
                    mesh.vertices.push(vertex);
                }
            }
            Some("f") => {
                let mesh_index = meshes.len().saturating_sub(1);
                let vertex_count = meshes.last().map_or(0, Mesh::vertex_count);
                let indices = tokens
                    .map(|token| parse_face_index(token, number, mesh_index, vertex_count))
                    .collect::<Result<Vec<_>, _>>()?;
                if indices.len() < 3 {
                    let message = format!("face needs at least 3 vertices, got {}", indices.len());
                    return Err(parse_error(number, message));
                }
                let Some(mesh) = meshes.last_mut() else {
                    return Err(parse_error(number, "face before any vertex"));
                };
                for i in 1..indices.len() - 1 {
                    mesh.faces.extend([indices[0], indices[i], indices[i + 1]]);
                }
                after_face = true;
            }
            _ => {}
        }
    }

    for (index, mesh) in meshes.iter().enumerate() {
        mesh.validate(index)?;
    }
    Ok(meshes)
}

fn parse_vertex<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, LoadError> {
    let mut coords = [0.0f32; 3];
    let mut count = 0;
    for token in tokens.take(3) {
        coords[count] = token
            .parse()
            .map_err(|_| parse_error(line, format!("invalid vertex coordinate {token:?}")))?;
        count += 1;
    }
    if count < 3 {
        return Err(parse_error(line, format!("vertex needs 3 coordinates, got {count}")));
    }
    Ok(Vec3::new(coords[0], coords[1], coords[2]))
}

/// Reads the position index of a `v`, `v/vt`, `v//vn` or `v/vt/vn` token.
fn parse_face_index(
    token: &str,
    line: usize,
    mesh: usize,
    vertex_count: usize,
) -> Result<u32, LoadError> {
    let position = token.split('/').next().unwrap_or_default();
    let index: i64 = position
        .parse()
        .map_err(|_| parse_error(line, format!("invalid face index {token:?}")))?;
    u32::try_from(index)
        .ok()
        .filter(|&i| i > 0)
        .ok_or(LoadError::FaceIndexOutOfRange {
            mesh,
            index,
            vertex_count,
        })
}

fn parse_error(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read, Write};

    const CUBE: &str = "\
# unit cube, one triangle per side
v -1 -1 -1
v -1  1 -1
v  1  1 -1
v  1 -1 -1
v  1  1  1
v  1 -1  1
v -1  1  1
v -1 -1  1
f 1 2 3
f 4 3 5
f 6 5 7
f 8 7 2
f 2 7 5
f 6 8 1
";

    fn parse(text: &str) -> Result<Vec<Mesh>, LoadError> {
        parse_obj(Cursor::new(text))
    }

    #[test]
    fn cube_parses_into_one_mesh() {
        let meshes = parse(CUBE).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertex_count(), 8);
        assert_eq!(meshes[0].face_index_count(), 18);
        assert_eq!(meshes[0].triangles().count(), 6);
        assert_eq!(meshes[0].vertices()[4], Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn slash_tokens_keep_the_position_index() {
        let meshes = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1/1/1 2//1 3/3\n").unwrap();
        assert_eq!(meshes[0].faces(), &[1, 2, 3]);
    }

    #[test]
    fn polygons_are_fan_triangulated() {
        let meshes = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv -1 1 0\nf 1 2 3 4 5\n").unwrap();
        assert_eq!(meshes[0].faces(), &[1, 2, 3, 1, 3, 4, 1, 4, 5]);
    }

    #[test]
    fn vertex_after_face_starts_a_new_mesh() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 1 3 2\n";
        let meshes = parse(text).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[1].vertices()[0], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(meshes[1].faces(), &[1, 3, 2]);
    }

    #[test]
    fn unknown_lines_are_ignored() {
        let text = "mtllib cube.mtl\no Cube\nv 0 0 0\nvt 0 0\nv 1 0 0\n\
                    s off\nv 0 1 0\nusemtl red\nf 1 2 3\n";
        let meshes = parse(text).unwrap();
        assert_eq!(meshes[0].vertex_count(), 3);
    }

    #[test]
    fn empty_input_has_no_meshes() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn zero_index_is_rejected() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, LoadError::FaceIndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn index_past_vertex_count_is_rejected() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange {
                mesh: 0,
                index: 4,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let err = parse("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let err = parse("v 0 0\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));

        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 3, .. }));

        let err = parse("f 1 2 3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn non_utf8_text_in_skipped_lines_is_ignored() {
        let bytes = b"# caf\xe9 model\r\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl \xff\xfe\nf 1 2 3\n";
        let meshes = parse_obj(&bytes[..]).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].triangle_count(), 1);
    }

    #[test]
    fn non_utf8_vertex_is_a_parse_error() {
        let err = parse_obj(&b"v 0 0 0\nv 0 \xff 0\n"[..]).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    /// Serves its bytes once, then fails every read.
    struct BrokenReader(Option<&'static [u8]>);

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.take() {
                Some(bytes) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    Ok(n)
                }
                None => Err(io::Error::new(io::ErrorKind::Other, "disk went away")),
            }
        }
    }

    #[test]
    fn read_failure_mid_stream_is_reported() {
        let reader = BufReader::new(BrokenReader(Some(b"v 0 0 0\nv 1 0")));
        let err = parse_obj(reader).unwrap_err();
        assert!(matches!(err, LoadError::Read(ref e) if e.kind() == io::ErrorKind::Other));
    }

    #[test]
    fn load_requires_an_extension() {
        let err = load("models/cube").unwrap_err();
        assert!(matches!(err, LoadError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn load_skips_other_formats() {
        assert!(load("models/cube.ply").unwrap().is_empty());
    }

    #[test]
    fn load_reports_missing_files() {
        let err = load("this/does/not/exist.obj").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn load_reads_obj_files_with_any_case_extension() {
        let mut file = tempfile::Builder::new().suffix(".OBJ").tempfile().unwrap();
        file.write_all(CUBE.as_bytes()).unwrap();
        file.flush().unwrap();

        let meshes = load(file.path()).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].triangle_count(), 6);
    }
}
