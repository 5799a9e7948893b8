//! Category allow-list for report submissions.
//!
//! The permitted taxonomy is injected at startup (REPORT_CATEGORIES env or
//! the built-in default list) so deployments can choose their own set without
//! a schema change.

/// Permitted report categories, fixed for the process lifetime.
pub struct CategoryRegistry {
    slugs: Vec<String>,
}

impl CategoryRegistry {
    pub fn new(slugs: Vec<String>) -> Self {
        Self { slugs }
    }

    /// Check whether a category slug is permitted
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    /// All permitted slugs, in configured order
    pub fn all(&self) -> &[String] {
        &self.slugs
    }
}

/// Built-in default taxonomy (city-services complaint categories).
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORY_SLUGS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

const DEFAULT_CATEGORY_SLUGS: &[&str] = &[
    "pohon",
    "jalan",
    "parkir-liar",
    "sampah",
    "administrasi-terkait-penanggulangan-kebakaran-dan-penyelamatan",
    "ambulans-gawat-darurat",
    "arus-lalu-lintas",
    "bahan-bakar-gas",
    "bahan-bakar-minyak",
    "banjir",
    "bantuan-pendidikan",
    "bantuan-sosial",
    "batas-wilayah",
    "bpjs",
    "demam-berdarah-dengue",
    "fasilitas-kerjasama-kolaborasi-pemda-dki",
    "fasilitas-kesehatan-milik-pusat-swasta",
    "fasilitas-olahraga",
    "fasilitas-pendidikan-milik-pemerintah-pusat-swasta",
    "fasilitas-sosial-fasilitas-umum",
    "gangguan-ketenteraman-dan-ketertiban",
    "gedung-sekolah",
    "hubungan-pekerja-pengusaha",
    "imunisasi",
    "industri-kecil-dan-menengah",
    "internal-dinas-pariwisata-dan-kebudayaan",
    "jak-wifi",
    "jaringan-air-bersih",
    "jaringan-komunikasi",
    "jaringan-listrik-1",
    "jembatan-penyeberangan-orang-jpo-dan-atau-halte",
    "kartu-jakarta-pintar",
    "kartu-jakarta-sehat-kjs",
    "kartu-keluarga",
    "kdm-dan-iklan-rokok",
    "kearsipan",
    "kegiatan-seni-dan-budaya",
    "keluarga-berencana",
    "keluhan-galian-sisa-proyek",
    "kepemudaan",
    "komunikasi-pemerintah",
    "konflik-sosial",
    "koperasi",
    "ktp-elektronik-ktp-el",
    "kurikulum-dan-kegiatan-sekolah",
    "layanan-administrasi-kependudukan-orang-asing",
    "lembaga-kemasyarakatan",
    "lokasi-binaan-dan-lokasi-sementara",
    "minimarket",
    "orang-hilang",
    "pajak-bumi-dan-bangunan",
    "pekerja-penanganan-prasarana-dan-sarana-umum-kelurahan",
    "pelatihan-kerja-dan-produktivitas-tenaga-kerja",
    "pelayanan-perhubungan",
    "pembebasan-lahan",
    "pemberdayaan-perempuan",
    "penanganan-kebakaran",
    "penataan-dan-pengembangan-wilayah",
    "penataan-permukiman-kampung-deret-bedah-rumah-dll",
    "pencemaran-lingkungan",
    "pendidikan-anak-usia-dini",
    "pengolahan-ikan",
    "penyakit-masyarakat",
    "penyandang-masalah-kesejahteraan-sosial-pmks",
    "penyelamatan",
    "perdagangan",
    "perizinan-ketenagakerjaan-dan-olahraga",
    "perpustakaan",
    "pkl-liar",
    "posyandu",
    "ppdb",
    "prasarana-dan-sarana-penanggulangan-kebakaran",
    "pungutan-liar",
    "puskesmas",
    "reklame",
    "rsud",
    "ruang-publik-terpadu-ramah-anak-rptra",
    "rumah-potong-hewan",
    "rumah-susun-hunian-vertikal",
    "rupabumi",
    "saluran-air-kali-sungai",
    "sanitasi-dan-keamanan-pangan",
    "satwa-liar",
    "sembilan-bahan-pokok",
    "sertifikasi-guru",
    "sertifikat-atau-dokumen-kepemilikan",
    "sertifikat-laik-fungsi",
    "statistik-daerah",
    "sumur-resapan",
    "taman",
    "taman-pemakaman-umum",
    "tata-ruang-dan-bangunan",
    "tempat-hiburan",
    "tempat-pelelangan-ikan",
    "tempat-wisata",
    "tenaga-kependidikan",
    "tindakan-asusila",
    "transmigrasi",
    "transportasi-publik",
    "trotoar",
    "tutup-saluran",
    "umkm",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_contains_core_categories() {
        let registry = CategoryRegistry::new(default_categories());
        assert!(registry.contains("jalan"));
        assert!(registry.contains("banjir"));
        assert!(registry.contains("sampah"));
        assert!(!registry.contains("not-a-category"));
    }

    #[test]
    fn test_custom_taxonomy_replaces_default() {
        let registry = CategoryRegistry::new(vec!["roads".to_string(), "waste".to_string()]);
        assert!(registry.contains("roads"));
        assert!(!registry.contains("jalan"));
        assert_eq!(registry.all().len(), 2);
    }
}
