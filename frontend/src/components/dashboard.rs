use crate::components::icons::{ChartBar, History};
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-8">
            <div>
                <p class="text-6xl font-bold mt-10">"Selamat Datang"</p>
                <p class="text-sm text-base-content/50 font-semibold mt-2">
                    "Selamat beraktivitas dengan penuh ceria!"
                </p>
            </div>
            <div class="card bg-base-100 shadow-xl flex flex-col md:flex-row justify-around items-center py-10 mt-10 gap-6 md:gap-0">
                <div class="flex items-center gap-4">
                    <ChartBar attr:class="h-20 w-20 text-purple-400" />
                    <div>
                        <Link to="/laporan" class="font-semibold hover:text-purple-500 transition-colors">
                            "Laporan Harian"
                        </Link>
                        <p class="text-base-content/50">"Buat laporan harian anda sekarang"</p>
                    </div>
                </div>
                <div class="bg-base-300 rounded-full w-48 h-0.5 md:w-0.5 md:h-24"></div>
                <div class="flex items-center gap-4">
                    <History attr:class="h-20 w-20 text-blue-400" />
                    <div>
                        <Link to="/rekap" class="font-semibold hover:text-blue-500 transition-colors">
                            "Rekap Harian"
                        </Link>
                        <p class="text-base-content/50">"Cek rekapan laporan harian"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
