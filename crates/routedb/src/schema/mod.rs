//! FlatBuffers bindings for `route.fbs`
//!
//! `Route` is the read-only view over a finished buffer and `RouteBuilder` writes one.
//! Strings and the path vector must be created before the table is started.

#![allow(clippy::needless_lifetimes)]

use flatbuffers::{Follow, Verifiable};

/// Fixed-size path element: micro-degree latitude and longitude, little-endian
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct GeoPoint(pub [u8; 8]);

impl std::fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoPoint")
            .field("lat", &self.lat())
            .field("lon", &self.lon())
            .finish()
    }
}

impl GeoPoint {
    pub fn new(lat: i32, lon: i32) -> Self {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&lat.to_le_bytes());
        bytes[4..8].copy_from_slice(&lon.to_le_bytes());
        Self(bytes)
    }

    #[inline]
    pub fn lat(&self) -> i32 {
        let b = &self.0;
        i32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    #[inline]
    pub fn lon(&self) -> i32 {
        let b = &self.0;
        i32::from_le_bytes([b[4], b[5], b[6], b[7]])
    }
}

impl flatbuffers::SimpleToVerifyInSlice for GeoPoint {}

impl<'a> Follow<'a> for GeoPoint {
    type Inner = &'a GeoPoint;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        unsafe { <&'a GeoPoint>::follow(buf, loc) }
    }
}

impl<'a> Follow<'a> for &'a GeoPoint {
    type Inner = &'a GeoPoint;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        unsafe { flatbuffers::follow_cast_ref::<GeoPoint>(buf, loc) }
    }
}

impl flatbuffers::Push for GeoPoint {
    type Output = GeoPoint;
    #[inline]
    unsafe fn push(&self, dst: &mut [u8], _written_len: usize) {
        dst.copy_from_slice(&self.0);
    }
    #[inline]
    fn alignment() -> flatbuffers::PushAlignment {
        flatbuffers::PushAlignment::new(4)
    }
}

impl Verifiable for GeoPoint {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.in_buffer::<Self>(pos)
    }
}

/// Read-only view of a `Route` table
#[derive(Clone, Copy)]
pub struct Route<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> Follow<'a> for Route<'a> {
    type Inner = Route<'a>;
    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: unsafe { flatbuffers::Table::new(buf, loc) },
        }
    }
}

impl<'a> Route<'a> {
    pub const VT_COUNTRY: flatbuffers::VOffsetT = 4;
    pub const VT_CITY: flatbuffers::VOffsetT = 6;
    pub const VT_NAME: flatbuffers::VOffsetT = 8;
    pub const VT_PATH: flatbuffers::VOffsetT = 10;

    pub fn create<'bldr: 'args, 'args: 'mut_bldr, 'mut_bldr>(
        fbb: &'mut_bldr mut flatbuffers::FlatBufferBuilder<'bldr>,
        args: &'args RouteArgs<'args>,
    ) -> flatbuffers::WIPOffset<Route<'bldr>> {
        let mut builder = RouteBuilder::new(fbb);
        if let Some(x) = args.path {
            builder.add_path(x);
        }
        if let Some(x) = args.name {
            builder.add_name(x);
        }
        if let Some(x) = args.city {
            builder.add_city(x);
        }
        if let Some(x) = args.country {
            builder.add_country(x);
        }
        builder.finish()
    }

    #[inline]
    pub fn country(&self) -> Option<&'a str> {
        // Safety: the table was produced by `root` (verified) or by the caller's own builder.
        unsafe {
            self._tab
                .get::<flatbuffers::ForwardsUOffset<&str>>(Route::VT_COUNTRY, None)
        }
    }

    #[inline]
    pub fn city(&self) -> Option<&'a str> {
        unsafe {
            self._tab
                .get::<flatbuffers::ForwardsUOffset<&str>>(Route::VT_CITY, None)
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        unsafe {
            self._tab
                .get::<flatbuffers::ForwardsUOffset<&str>>(Route::VT_NAME, None)
        }
    }

    #[inline]
    pub fn path(&self) -> Option<flatbuffers::Vector<'a, GeoPoint>> {
        unsafe {
            self._tab
                .get::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'a, GeoPoint>>>(
                    Route::VT_PATH,
                    None,
                )
        }
    }

    /// Number of path elements, zero when the field is absent
    #[inline]
    pub fn path_length(&self) -> usize {
        self.path().map(|path| path.len()).unwrap_or(0)
    }
}

impl Verifiable for Route<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<flatbuffers::ForwardsUOffset<&str>>("country", Self::VT_COUNTRY, false)?
            .visit_field::<flatbuffers::ForwardsUOffset<&str>>("city", Self::VT_CITY, false)?
            .visit_field::<flatbuffers::ForwardsUOffset<&str>>("name", Self::VT_NAME, false)?
            .visit_field::<flatbuffers::ForwardsUOffset<flatbuffers::Vector<'_, GeoPoint>>>(
                "path",
                Self::VT_PATH,
                false,
            )?
            .finish();
        Ok(())
    }
}

#[derive(Default)]
pub struct RouteArgs<'a> {
    pub country: Option<flatbuffers::WIPOffset<&'a str>>,
    pub city: Option<flatbuffers::WIPOffset<&'a str>>,
    pub name: Option<flatbuffers::WIPOffset<&'a str>>,
    pub path: Option<flatbuffers::WIPOffset<flatbuffers::Vector<'a, GeoPoint>>>,
}

pub struct RouteBuilder<'a: 'b, 'b> {
    fbb: &'b mut flatbuffers::FlatBufferBuilder<'a>,
    start: flatbuffers::WIPOffset<flatbuffers::TableUnfinishedWIPOffset>,
}

impl<'a: 'b, 'b> RouteBuilder<'a, 'b> {
    #[inline]
    pub fn new(fbb: &'b mut flatbuffers::FlatBufferBuilder<'a>) -> RouteBuilder<'a, 'b> {
        let start = fbb.start_table();
        RouteBuilder { fbb, start }
    }

    #[inline]
    pub fn add_country(&mut self, country: flatbuffers::WIPOffset<&'b str>) {
        self.fbb
            .push_slot_always::<flatbuffers::WIPOffset<_>>(Route::VT_COUNTRY, country);
    }

    #[inline]
    pub fn add_city(&mut self, city: flatbuffers::WIPOffset<&'b str>) {
        self.fbb
            .push_slot_always::<flatbuffers::WIPOffset<_>>(Route::VT_CITY, city);
    }

    #[inline]
    pub fn add_name(&mut self, name: flatbuffers::WIPOffset<&'b str>) {
        self.fbb
            .push_slot_always::<flatbuffers::WIPOffset<_>>(Route::VT_NAME, name);
    }

    #[inline]
    pub fn add_path(&mut self, path: flatbuffers::WIPOffset<flatbuffers::Vector<'b, GeoPoint>>) {
        self.fbb
            .push_slot_always::<flatbuffers::WIPOffset<_>>(Route::VT_PATH, path);
    }

    #[inline]
    pub fn finish(self) -> flatbuffers::WIPOffset<Route<'a>> {
        let o = self.fbb.end_table(self.start);
        flatbuffers::WIPOffset::new(o.value())
    }
}

/// Verify `buf` and return the `Route` at its root
#[inline]
pub fn root_as_route(buf: &[u8]) -> Result<Route<'_>, flatbuffers::InvalidFlatbuffer> {
    flatbuffers::root::<Route>(buf)
}

#[inline]
pub fn finish_route_buffer<'a>(
    fbb: &mut flatbuffers::FlatBufferBuilder<'a>,
    root: flatbuffers::WIPOffset<Route<'a>>,
) {
    fbb.finish(root, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_layout() {
        let point = GeoPoint::new(40_502_630, -127_800);
        assert_eq!(point.lat(), 40_502_630);
        assert_eq!(point.lon(), -127_800);
        assert_eq!(&point.0[0..4], &40_502_630i32.to_le_bytes());
        assert_eq!(std::mem::size_of::<GeoPoint>(), 8);
    }

    #[test]
    fn test_build_and_read_table() {
        let mut fbb = flatbuffers::FlatBufferBuilder::new();
        let country = fbb.create_string("kg");
        let path = fbb.create_vector(&[GeoPoint::new(1, 2), GeoPoint::new(3, 4)]);
        let route = Route::create(
            &mut fbb,
            &RouteArgs {
                country: Some(country),
                path: Some(path),
                ..Default::default()
            },
        );
        finish_route_buffer(&mut fbb, route);

        let route = root_as_route(fbb.finished_data()).unwrap();
        assert_eq!(route.country(), Some("kg"));
        assert_eq!(route.city(), None);
        assert_eq!(route.name(), None);
        assert_eq!(route.path_length(), 2);

        let path = route.path().unwrap();
        assert_eq!(path.get(1).lat(), 3);
        assert_eq!(path.get(1).lon(), 4);
    }

    #[test]
    fn test_garbage_fails_verification() {
        assert!(root_as_route(&[0xff; 3]).is_err());
        assert!(root_as_route(&[0xff, 0xff, 0xff, 0x7f, 0, 0, 0, 0]).is_err());
    }
}
