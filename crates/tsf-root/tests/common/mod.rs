//! Minimal ROOT file writer for reader tests.
//!
//! Produces small-format files (32-bit seeks) with the streamer layout the
//! reader expects: byte-counted TH1/TH2 objects, TDirectory records and key
//! lists. Objects can be stored raw or as zlib blocks.

#![allow(dead_code)]

use std::io::Write;

pub const BEGIN: usize = 100;
const NBYTES_NAME: usize = 32;
const TOP_DIR_LEN: usize = 64;

#[derive(Default)]
pub struct Writer {
    pub buf: Vec<u8>,
}

impl Writer {
    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }
    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    pub fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    pub fn f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    pub fn f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }
    pub fn string(&mut self, s: &str) {
        assert!(s.len() < 255);
        self.u8(s.len() as u8);
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// A byte-counted streamed object.
    pub fn object(&mut self, version: u16, body: impl FnOnce(&mut Writer)) {
        let mut inner = Writer::default();
        body(&mut inner);
        self.u32(0x4000_0000 | (inner.buf.len() as u32 + 2));
        self.u16(version);
        self.buf.extend(inner.buf);
    }

    fn tnamed(&mut self, name: &str, title: &str) {
        self.object(1, |w| {
            w.u16(1);
            w.u32(0);
            w.u32(0x0300_0000);
            w.string(name);
            w.string(title);
        });
    }

    fn att(&mut self) {
        self.object(2, |w| {
            w.u16(602);
            w.u16(1);
            w.u16(1);
        });
    }
}

/// Binning of one histogram axis.
#[derive(Clone)]
pub struct AxisSpec {
    pub n_bins: usize,
    pub min: f64,
    pub max: f64,
    pub edges: Option<Vec<f64>>,
}

impl AxisSpec {
    pub fn uniform(n_bins: usize, min: f64, max: f64) -> Self {
        Self { n_bins, min, max, edges: None }
    }

    pub fn variable(edges: &[f64]) -> Self {
        Self {
            n_bins: edges.len() - 1,
            min: edges[0],
            max: edges[edges.len() - 1],
            edges: Some(edges.to_vec()),
        }
    }

    fn write(&self, w: &mut Writer, name: &str) {
        w.object(10, |w| {
            w.tnamed(name, "");
            w.object(4, |w| {
                for _ in 0..4 {
                    w.i32(0);
                }
            });
            w.i32(self.n_bins as i32);
            w.f64(self.min);
            w.f64(self.max);
            match &self.edges {
                Some(e) => {
                    w.u32(e.len() as u32);
                    e.iter().for_each(|&v| w.f64(v));
                }
                None => w.u32(0),
            }
            // fFirst, fLast, fBits2, fTimeDisplay, fTimeFormat
            w.i32(0);
            w.i32(0);
            w.u16(0);
            w.u8(0);
            w.string("");
        });
    }
}

fn th1_base(w: &mut Writer, name: &str, x: &AxisSpec, y: &AxisSpec, n_cells: usize) {
    w.object(8, |w| {
        w.tnamed(name, "trigger efficiency");
        w.att();
        w.att();
        w.att();
        w.i32(n_cells as i32);
        x.write(w, "xaxis");
        y.write(w, "yaxis");
        AxisSpec::uniform(1, 0.0, 1.0).write(w, "zaxis");
        // bar offset/width, entries and moments
        w.u16(0);
        w.u16(1000);
        for _ in 0..7 {
            w.f64(0.0);
        }
    });
}

fn contents(w: &mut Writer, raw: &[f64], float: bool) {
    w.u32(raw.len() as u32);
    for &v in raw {
        if float { w.f32(v as f32) } else { w.f64(v) }
    }
}

/// TH1D (or TH1F with `float`) payload; `raw` includes under/overflow.
pub fn th1_payload(name: &str, x: &AxisSpec, raw: &[f64], float: bool) -> Vec<u8> {
    assert_eq!(raw.len(), x.n_bins + 2);
    let mut w = Writer::default();
    w.object(3, |w| {
        th1_base(w, name, x, &AxisSpec::uniform(1, 0.0, 1.0), raw.len());
        contents(w, raw, float);
    });
    w.buf
}

/// TH2D (or TH2F) payload from x-major values without flow bins.
///
/// Flow cells are filled with `flow`.
pub fn th2_payload(
    name: &str,
    x: &AxisSpec,
    y: &AxisSpec,
    values: &[f64],
    flow: f64,
    float: bool,
) -> Vec<u8> {
    let (nx, ny) = (x.n_bins, y.n_bins);
    assert_eq!(values.len(), nx * ny);
    let stride = nx + 2;
    let mut raw = vec![flow; (nx + 2) * (ny + 2)];
    for ix in 0..nx {
        for iy in 0..ny {
            raw[(ix + 1) + stride * (iy + 1)] = values[ix * ny + iy];
        }
    }

    let mut w = Writer::default();
    w.object(4, |w| {
        w.object(5, |w| {
            th1_base(w, name, x, y, raw.len());
            for _ in 0..4 {
                w.f64(0.0);
            }
        });
        contents(w, &raw, float);
    });
    w.buf
}

/// Wrap bytes in a single ROOT zlib block.
pub fn zlib_block(raw: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(raw).unwrap();
    let compressed = enc.finish().unwrap();

    let mut out = b"ZL".to_vec();
    out.push(8);
    out.extend_from_slice(&(compressed.len() as u32).to_le_bytes()[..3]);
    out.extend_from_slice(&(raw.len() as u32).to_le_bytes()[..3]);
    out.extend(compressed);
    out
}

pub enum Entry {
    Object { class: String, name: String, cycle: u16, payload: Vec<u8>, compress: bool },
    Dir { name: String, entries: Vec<Entry> },
}

#[derive(Default)]
pub struct FileBuilder {
    entries: Vec<Entry>,
}

impl FileBuilder {
    pub fn object(mut self, class: &str, name: &str, payload: Vec<u8>) -> Self {
        self.entries.push(Entry::Object {
            class: class.into(),
            name: name.into(),
            cycle: 1,
            payload,
            compress: false,
        });
        self
    }

    pub fn compressed(mut self, class: &str, name: &str, payload: Vec<u8>) -> Self {
        self.entries.push(Entry::Object {
            class: class.into(),
            name: name.into(),
            cycle: 1,
            payload,
            compress: true,
        });
        self
    }

    pub fn cycle(mut self, class: &str, name: &str, cycle: u16, payload: Vec<u8>) -> Self {
        self.entries.push(Entry::Object {
            class: class.into(),
            name: name.into(),
            cycle,
            payload,
            compress: false,
        });
        self
    }

    pub fn dir(mut self, name: &str, sub: FileBuilder) -> Self {
        self.entries.push(Entry::Dir { name: name.into(), entries: sub.entries });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = vec![0u8; BEGIN + NBYTES_NAME + TOP_DIR_LEN];

        let headers = write_entries(&mut buf, &self.entries);
        let seek_keys = write_key_list(&mut buf, &headers);
        let end = buf.len() as u32;

        let mut h = Writer::default();
        h.buf.extend_from_slice(b"root");
        h.u32(62_206);
        h.u32(BEGIN as u32);
        h.u32(end);
        h.u32(0); // fSeekFree
        h.u32(0); // fNbytesFree
        h.u32(0); // nfree
        h.u32(NBYTES_NAME as u32);
        h.u8(4);
        h.u32(101);
        h.u32(0); // fSeekInfo
        h.u32(0); // fNbytesInfo
        buf[..h.buf.len()].copy_from_slice(&h.buf);

        let dir = directory_record(seek_keys);
        buf[BEGIN + NBYTES_NAME..BEGIN + NBYTES_NAME + dir.len()].copy_from_slice(&dir);
        buf
    }
}

fn directory_record(seek_keys: u32) -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(5);
    w.u32(0);
    w.u32(0);
    w.u32(0); // nbytes_keys
    w.u32(NBYTES_NAME as u32);
    w.u32(BEGIN as u32);
    w.u32(0);
    w.u32(seek_keys);
    w.buf
}

fn key_header(
    stored_len: usize,
    obj_len: usize,
    cycle: u16,
    seek_key: usize,
    class: &str,
    name: &str,
) -> Vec<u8> {
    let title = "";
    let key_len = 26 + 3 + class.len() + name.len() + title.len();
    let mut w = Writer::default();
    w.u32((key_len + stored_len) as u32);
    w.u16(4);
    w.u32(obj_len as u32);
    w.u32(0);
    w.u16(key_len as u16);
    w.u16(cycle);
    w.u32(seek_key as u32);
    w.u32(BEGIN as u32);
    w.string(class);
    w.string(name);
    w.string(title);
    assert_eq!(w.buf.len(), key_len);
    w.buf
}

fn write_record(
    buf: &mut Vec<u8>,
    class: &str,
    name: &str,
    cycle: u16,
    payload: &[u8],
    compress: bool,
) -> Vec<u8> {
    let stored = if compress { zlib_block(payload) } else { payload.to_vec() };
    let header = key_header(stored.len(), payload.len(), cycle, buf.len(), class, name);
    buf.extend_from_slice(&header);
    buf.extend(stored);
    header
}

fn write_entries(buf: &mut Vec<u8>, entries: &[Entry]) -> Vec<Vec<u8>> {
    entries
        .iter()
        .map(|e| match e {
            Entry::Object { class, name, cycle, payload, compress } => {
                write_record(buf, class, name, *cycle, payload, *compress)
            }
            Entry::Dir { name, entries } => {
                let headers = write_entries(buf, entries);
                let seek_keys = write_key_list(buf, &headers);
                let payload = directory_record(seek_keys);
                write_record(buf, "TDirectoryFile", name, 1, &payload, false)
            }
        })
        .collect()
}

fn write_key_list(buf: &mut Vec<u8>, headers: &[Vec<u8>]) -> u32 {
    let pos = buf.len();
    let mut body = Writer::default();
    body.u32(headers.len() as u32);
    headers.iter().for_each(|h| body.buf.extend_from_slice(h));

    let list_key = key_header(body.buf.len(), body.buf.len(), 1, pos, "TFile", "keys");
    buf.extend(list_key);
    buf.extend(body.buf);
    pos as u32
}
